use clap::ValueEnum;

/// Default capacity of the bounded record queue
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Main configuration struct for regan
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
    pub performance: PerformanceConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub files: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub stats: bool,
    /// 1 hides per-file progress, 2 also hides unattributed-record warnings
    pub quiet_level: u8,
    pub color: ColorMode,
    pub no_emoji: bool,
}

/// Processing configuration
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub fail_fast: bool,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    /// Worker cap, 0 means one per CPU
    pub threads: usize,
    pub buffer_size: usize,
}

/// Color output mode
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl RegistryConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let color = if cli.no_color {
            ColorMode::Never
        } else {
            cli.color.clone()
        };

        Self {
            input: InputConfig {
                files: cli.files.clone(),
            },
            output: OutputConfig {
                stats: cli.stats,
                quiet_level: cli.quiet,
                color,
                no_emoji: cli.no_emoji,
            },
            processing: ProcessingConfig {
                fail_fast: cli.fail_fast,
            },
            performance: PerformanceConfig {
                threads: cli.threads,
                buffer_size: cli.buffer_size.max(1),
            },
        }
    }

    /// Worker count: the thread cap, never more than one worker per file
    pub fn effective_workers(&self) -> usize {
        let threads = if self.performance.threads == 0 {
            num_cpus::get()
        } else {
            self.performance.threads
        };
        threads.min(self.input.files.len()).max(1)
    }

    pub fn format_info_message(&self, message: &str) -> String {
        self.output.format_info_message(message)
    }

    pub fn format_error_message(&self, message: &str) -> String {
        self.output.format_error_message(message)
    }
}

impl OutputConfig {
    fn use_emoji(&self) -> bool {
        !self.no_emoji && crate::tty::should_use_emoji_for_stderr()
    }

    pub fn use_colors(&self) -> bool {
        crate::tty::should_use_colors_with_mode(&self.color)
    }

    pub fn show_progress(&self) -> bool {
        self.quiet_level == 0
    }

    pub fn show_warnings(&self) -> bool {
        self.quiet_level < 2
    }

    pub fn format_info_message(&self, message: &str) -> String {
        if self.use_emoji() {
            format!("🔹 {}", message)
        } else {
            format!("regan: {}", message)
        }
    }

    pub fn format_warning_message(&self, message: &str) -> String {
        if self.use_emoji() {
            format!("⚠️  {}", message)
        } else {
            format!("regan: Warning: {}", message)
        }
    }

    pub fn format_error_message(&self, message: &str) -> String {
        if self.use_emoji() {
            format!("⚠️  {}", message)
        } else {
            format!("regan: Error: {}", message)
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            input: InputConfig { files: Vec::new() },
            output: OutputConfig::default(),
            processing: ProcessingConfig { fail_fast: false },
            performance: PerformanceConfig {
                threads: 0,
                buffer_size: DEFAULT_BUFFER_SIZE,
            },
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stats: false,
            quiet_level: 0,
            color: ColorMode::Auto,
            no_emoji: false,
        }
    }
}
