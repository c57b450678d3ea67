use std::path::PathBuf;

use crate::capture::{ScreenSource, native_screen};
use crate::config::ClickshotConfig;
use crate::interact::{InputDriver, native_input};
use crate::matching::MatchConfig;
use crate::reference::ReferenceLibrary;
use crate::wait::WaitConfig;

use super::handler::Session;

/// Default time `click` waits for its element
pub const DEFAULT_CLICK_TIMEOUT_MS: u64 = 2_000;

/// Builder for [`Session`]. Unset backends fall back to the platform's native ones.
#[derive(Default)]
pub struct SessionBuilder {
    screen: Option<Box<dyn ScreenSource>>,
    input: Option<Box<dyn InputDriver>>,
    images_dir: Option<PathBuf>,
    failure_dir: Option<PathBuf>,
    match_config: MatchConfig,
    wait: WaitConfig,
    click_wait: Option<WaitConfig>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from loaded configuration: matching, wait and path settings
    pub fn from_config(config: &ClickshotConfig) -> Self {
        Self {
            images_dir: Some(config.images_dir()),
            failure_dir: config.failure_dir(),
            match_config: config.match_config(),
            wait: config.wait_config(),
            click_wait: Some(config.click_wait_config()),
            ..Self::default()
        }
    }

    pub fn screen(mut self, screen: impl ScreenSource + 'static) -> Self {
        self.screen = Some(Box::new(screen));
        self
    }

    pub fn input(mut self, input: impl InputDriver + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Directory holding `<region>/<element>.png` reference images
    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = Some(dir.into());
        self
    }

    /// Directory where the searched area is saved when a check fails
    pub fn failure_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.failure_dir = Some(dir.into());
        self
    }

    pub fn match_config(mut self, config: MatchConfig) -> Self {
        self.match_config = config;
        self
    }

    pub fn wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// How long `click` waits for its element before failing
    pub fn click_wait(mut self, wait: WaitConfig) -> Self {
        self.click_wait = Some(wait);
        self
    }

    pub fn build(self) -> Session {
        let click_wait = self.click_wait.unwrap_or_else(|| {
            WaitConfig::new(
                std::time::Duration::from_millis(DEFAULT_CLICK_TIMEOUT_MS),
                self.wait.poll_interval(),
            )
        });
        Session::new(
            self.screen.unwrap_or_else(native_screen),
            self.input.unwrap_or_else(native_input),
            ReferenceLibrary::new(self.images_dir.unwrap_or_else(|| PathBuf::from("images"))),
            self.failure_dir,
            self.match_config,
            self.wait,
            click_wait,
        )
    }
}
