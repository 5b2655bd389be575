//! Benchmarks for catalog rendering.

use criterion::{Criterion, criterion_group, criterion_main};
use bookstack::app::{Message, Model, update};
use bookstack::catalog::Catalog;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn bench_render_frame(c: &mut Criterion) {
    let model = Model::new(Catalog::bundled().unwrap(), None, (130, 46));
    let scrolled = update(
        Model::new(Catalog::bundled().unwrap(), None, (130, 46)),
        Message::ScrollDown(20),
    );
    let mut terminal = Terminal::new(TestBackend::new(130, 46)).unwrap();

    c.bench_function("render_top", |b| {
        b.iter(|| terminal.draw(|frame| bookstack::ui::render(&model, frame)).unwrap())
    });
    c.bench_function("render_scrolled", |b| {
        b.iter(|| terminal.draw(|frame| bookstack::ui::render(&scrolled, frame)).unwrap())
    });
}

criterion_group!(benches, bench_render_frame);
criterion_main!(benches);
