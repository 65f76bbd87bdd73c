//! Build spinner that becomes a no-op when the `progress` feature is disabled

#[cfg(feature = "progress")]
mod imp {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    /// Spinner drawn on stderr while a long step runs
    pub struct Spinner {
        bar: ProgressBar,
    }

    impl Spinner {
        pub fn start(message: &str) -> Self {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(80));
            Self { bar }
        }

        pub fn finish(self, message: String) {
            self.bar.finish_with_message(message);
        }
    }
}

#[cfg(not(feature = "progress"))]
mod imp {
    /// No-op spinner when `progress` feature is disabled
    pub struct Spinner;

    impl Spinner {
        pub fn start(_message: &str) -> Self {
            Spinner
        }

        pub fn finish(self, _message: String) {}
    }
}

pub use imp::Spinner;
