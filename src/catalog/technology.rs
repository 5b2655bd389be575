use ratatui::style::Color;

/// Known catalog technologies, used to pick a badge icon and brand color.
///
/// Unknown category names resolve to [`Technology::Other`], which renders
/// the default book icon without a brand color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    Css,
    JavaScript,
    React,
    Html,
    NodeJs,
    TypeScript,
    Other,
}

impl Technology {
    pub const KNOWN: [Self; 6] = [
        Self::Css,
        Self::JavaScript,
        Self::React,
        Self::Html,
        Self::NodeJs,
        Self::TypeScript,
    ];

    pub fn from_topic(name: &str) -> Self {
        match name {
            "CSS" => Self::Css,
            "JavaScript" => Self::JavaScript,
            "React" => Self::React,
            "HTML" => Self::Html,
            "Node.js" => Self::NodeJs,
            "TypeScript" => Self::TypeScript,
            _ => Self::Other,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Css => "#",
            Self::JavaScript => "JS",
            Self::React => "⚛",
            Self::Html => "<>",
            Self::NodeJs => "⬢",
            Self::TypeScript => "TS",
            Self::Other => "📖",
        }
    }

    /// Official brand color, or `None` for the fallback.
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Css => Some(Color::Rgb(0x15, 0x72, 0xb6)),
            Self::JavaScript => Some(Color::Rgb(0xf7, 0xdf, 0x1e)),
            Self::React => Some(Color::Rgb(0x61, 0xda, 0xfb)),
            Self::Html => Some(Color::Rgb(0xe3, 0x4c, 0x26)),
            Self::NodeJs => Some(Color::Rgb(0x33, 0x99, 0x33)),
            Self::TypeScript => Some(Color::Rgb(0x31, 0x78, 0xc6)),
            Self::Other => None,
        }
    }
}
