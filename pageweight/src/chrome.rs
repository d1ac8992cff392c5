use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::configuration::Configuration;
use crate::error::{Error, Result};

/// Expression reading the current page height.
const SCROLL_HEIGHT_JS: &str = "document.body.scrollHeight";

/// Expression jumping the viewport to the bottom of the page.
const SCROLL_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight)";

/// Start playback of every video element, muted so autoplay is allowed.
/// Playback refusals are swallowed per element.
const PLAY_VIDEOS_JS: &str = r#"(() => {
    const videos = document.getElementsByTagName('video');
    for (const video of videos) {
        try {
            video.muted = true;
            video.play();
        } catch (err) {}
    }
})()"#;

/// One Chrome instance scoped to a single job.
///
/// The session owns the browser process and its CDP event loop. Acquire it
/// at the start of a job and call [`BrowserSession::shutdown`] on every exit
/// path so the process never outlives the job.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chrome with the configured profile and spawn the event loop.
    pub async fn launch(config: &Configuration) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage");

        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.request_timeout(timeout);
        }
        if let Some(path) = &config.chrome_binary {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder.build().map_err(Error::BrowserConfig)?;
        let (browser, mut handler) = Browser::launch(browser_config).await?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Open a new tab at the given url.
    pub async fn new_page(&self, url: &str) -> Result<Page> {
        let page = self.browser.new_page(url).await?;
        Ok(page)
    }

    /// Close the browser and reap the child process.
    ///
    /// Teardown failures are ignored; the handler task is aborted last so
    /// close commands still flow through the event loop.
    pub async fn shutdown(mut self) {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}

/// Scroll to the bottom of the page until the height settles.
///
/// Mirrors the lazy load trigger used by infinite feeds: jump to the
/// bottom, give the page `pause` to append content, and stop once the
/// height stops growing or `max_scrolls` attempts have been made.
pub async fn scroll_to_bottom(page: &Page, pause: Duration, max_scrolls: u32) -> Result<()> {
    let mut last_height = page_height(page).await?;

    for _ in 0..max_scrolls {
        page.evaluate(SCROLL_BOTTOM_JS).await?;
        tokio::time::sleep(pause).await;

        let height = page_height(page).await?;
        if height == last_height {
            break;
        }
        last_height = height;
    }

    Ok(())
}

/// Kick off playback of any video elements on the page.
///
/// Pages without videos or with refused playback are left as they are; the
/// caller only needs the network traffic a successful play produces.
pub async fn play_videos(page: &Page) {
    let _ = page.evaluate(PLAY_VIDEOS_JS).await;
}

async fn page_height(page: &Page) -> Result<i64> {
    let height = page.evaluate(SCROLL_HEIGHT_JS).await?.into_value::<i64>()?;
    Ok(height)
}
