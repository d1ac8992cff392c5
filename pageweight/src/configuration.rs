use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for a measurement or snapshot run.
///
/// Every knob the page driving code reads lives here, so callers and tests
/// pass an explicit value instead of editing module constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// How many pages are processed at the same time.
    pub concurrency: usize,
    /// Pause after each scroll step while lazy content loads.
    pub scroll_pause: Duration,
    /// Maximum scroll attempts per page.
    pub max_scrolls: u32,
    /// Wait after triggering video playback before reading the tally.
    pub video_wait: Duration,
    /// Run chrome without a visible window.
    pub headless: bool,
    /// Max time for a single devtools request. None disables the limit.
    pub request_timeout: Option<Duration>,
    /// Chrome binary to launch. Auto detected when None.
    pub chrome_binary: Option<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

impl Configuration {
    /// Defaults for an unattended batch run.
    pub fn new() -> Self {
        Self {
            concurrency: 10,
            scroll_pause: Duration::from_secs(2),
            max_scrolls: 60,
            video_wait: Duration::from_secs(5),
            headless: true,
            request_timeout: Some(Duration::from_secs(60)),
            chrome_binary: None,
        }
    }

    /// Set how many pages run at once.
    pub fn with_concurrency(&mut self, concurrency: usize) -> &mut Self {
        self.concurrency = concurrency;
        self
    }

    /// Pause between scroll steps.
    pub fn with_scroll_pause(&mut self, scroll_pause: Duration) -> &mut Self {
        self.scroll_pause = scroll_pause;
        self
    }

    /// Cap the scroll attempts per page.
    pub fn with_max_scrolls(&mut self, max_scrolls: u32) -> &mut Self {
        self.max_scrolls = max_scrolls;
        self
    }

    /// Wait after starting video playback.
    pub fn with_video_wait(&mut self, video_wait: Duration) -> &mut Self {
        self.video_wait = video_wait;
        self
    }

    /// Toggle headless mode.
    pub fn with_headless(&mut self, headless: bool) -> &mut Self {
        self.headless = headless;
        self
    }

    /// Max time to wait for a devtools request. None disables the limit.
    pub fn with_request_timeout(&mut self, request_timeout: Option<Duration>) -> &mut Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Launch a specific chrome binary instead of the detected one.
    pub fn with_chrome_binary(&mut self, chrome_binary: Option<PathBuf>) -> &mut Self {
        self.chrome_binary = chrome_binary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_batch_profile() {
        let config = Configuration::new();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.scroll_pause, Duration::from_secs(2));
        assert_eq!(config.max_scrolls, 60);
        assert_eq!(config.video_wait, Duration::from_secs(5));
        assert!(config.headless);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.chrome_binary, None);
    }

    #[test]
    fn builders_chain() {
        let mut config = Configuration::new();
        config
            .with_concurrency(2)
            .with_scroll_pause(Duration::from_millis(10))
            .with_max_scrolls(3)
            .with_video_wait(Duration::ZERO)
            .with_headless(false)
            .with_request_timeout(None)
            .with_chrome_binary(Some(PathBuf::from("/usr/bin/chromium")));

        assert_eq!(config.concurrency, 2);
        assert_eq!(config.scroll_pause, Duration::from_millis(10));
        assert_eq!(config.max_scrolls, 3);
        assert_eq!(config.video_wait, Duration::ZERO);
        assert!(!config.headless);
        assert_eq!(config.request_timeout, None);
        assert_eq!(
            config.chrome_binary,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }
}
