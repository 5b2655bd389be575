use std::fmt;

/// Sentinel filter name meaning "no restriction".
pub const ALL_TOPICS: &str = "All";

/// The set of active category filters.
///
/// Either exactly `{"All"}` or a non-empty list of concrete topic names in
/// the order they were selected. The empty internal list *is* the `"All"`
/// state, so the selection can never be empty and can never hold `"All"`
/// next to a concrete name.
///
/// # Example
///
/// ```
/// use bookstack::catalog::FilterSelection;
///
/// let mut sel = FilterSelection::default();
/// assert!(sel.is_all());
///
/// sel.toggle("React");
/// sel.toggle("CSS");
/// assert_eq!(sel.names().collect::<Vec<_>>(), vec!["React", "CSS"]);
///
/// sel.toggle("React");
/// sel.toggle("CSS");
/// assert!(sel.is_all());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    topics: Vec<String>,
}

impl FilterSelection {
    /// Selection restricted to the given topics; `"All"` entries are ignored.
    pub fn of<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sel = Self::default();
        for topic in topics {
            let topic = topic.as_ref();
            if topic != ALL_TOPICS && !sel.contains(topic) {
                sel.topics.push(topic.to_owned());
            }
        }
        sel
    }

    /// Multi-select toggle.
    ///
    /// `"All"` resets the selection. Any other name is removed if present
    /// and added otherwise; removing the last concrete name falls back to
    /// `"All"`.
    pub fn toggle(&mut self, topic: &str) {
        if topic == ALL_TOPICS {
            self.topics.clear();
            return;
        }
        if let Some(pos) = self.topics.iter().position(|t| t == topic) {
            self.topics.remove(pos);
        } else {
            self.topics.push(topic.to_owned());
        }
    }

    pub fn reset(&mut self) {
        self.topics.clear();
    }

    pub const fn is_all(&self) -> bool {
        self.topics.is_empty()
    }

    /// Whether `name` is one of the selected entries (including `"All"`).
    pub fn contains(&self, name: &str) -> bool {
        if name == ALL_TOPICS {
            return self.is_all();
        }
        self.topics.iter().any(|t| t == name)
    }

    /// Whether a category with this name is in scope.
    pub fn admits(&self, category: &str) -> bool {
        self.is_all() || self.topics.iter().any(|t| t == category)
    }

    /// Selected entries as shown to the user: `["All"]` or the concrete names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let all = self.is_all().then_some(ALL_TOPICS);
        all.into_iter().chain(self.topics.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.topics.len().max(1)
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Drop topics for which `keep` returns false, falling back to `"All"`
    /// when nothing remains.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.topics.retain(|t| keep(t));
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for name in self.names() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}
