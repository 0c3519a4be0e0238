/// ANSI color codes for the analysis report
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub source: &'static str,  // Bright yellow for flagged source paths
    pub key: &'static str,     // Cyan for registry keys
    pub failure: &'static str, // Bright red for failed files
    pub reset: &'static str,
}

impl ColorScheme {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                source: "\x1b[93m",
                key: "\x1b[36m",
                failure: "\x1b[91m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                source: "",
                key: "",
                failure: "",
                reset: "",
            }
        }
    }
}
