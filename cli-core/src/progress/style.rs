pub mod colors {
    use console::Style;

    pub fn prefix() -> Style {
        Style::new().cyan().bold()
    }

    pub fn success() -> Style {
        Style::new().green().bold()
    }

    pub fn warning() -> Style {
        Style::new().yellow().bold()
    }
}

pub mod templates {
    use indicatif::ProgressStyle;

    pub fn spinner() -> ProgressStyle {
        ProgressStyle::with_template("{prefix:>12.magenta.bold} {spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

pub mod prefixes {
    pub const VALIDATING: &str = "Validating";
    pub const UPLOADING: &str = "Uploading";
    pub const UPDATING: &str = "Updating";
    pub const PUBLISHED: &str = "Published";
    pub const WARNING: &str = "Warning";
}
