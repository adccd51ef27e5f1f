use super::chrome::ChromeSession;
use super::config::BrowserConfig;
use super::session::SessionError;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

/// Owns the Chrome process and hands out tabs
pub struct BrowserManager {
    browser: Browser,
}

impl BrowserManager {
    /// Launch a browser with the given configuration
    pub fn new(config: BrowserConfig) -> Result<Self, SessionError> {
        let args = config.launch_args();
        let launch_options = Self::build_launch_options(&config, &args)?;

        let browser = Browser::new(launch_options)
            .map_err(|e| SessionError::InitializationError(e.to_string()))?;

        log::info!(
            "Browser launched (headless: {}, window: {}x{})",
            config.headless,
            config.window_size.0,
            config.window_size.1
        );

        Ok(Self { browser })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        args: &'a [String],
    ) -> Result<LaunchOptions<'a>, SessionError> {
        let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .idle_browser_timeout(config.idle_timeout())
            .args(args)
            .build()
            .map_err(|e| SessionError::ConfigurationError(e.to_string()))
    }

    /// Create a new tab
    pub fn new_tab(&self) -> Result<Arc<Tab>, SessionError> {
        self.browser
            .new_tab()
            .map_err(|e| SessionError::TabCreationError(e.to_string()))
    }

    /// Open a fresh tab and wrap it as the shared automation session
    pub fn open_session(self) -> Result<ChromeSession, SessionError> {
        let tab = self.new_tab()?;
        Ok(ChromeSession::new(self, tab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_build() {
        let config = BrowserConfig::default();
        let args = config.launch_args();
        let options = BrowserManager::build_launch_options(&config, &args);
        assert!(options.is_ok());
    }

    #[test]
    fn test_launch_options_carry_flags() {
        let mut config = BrowserConfig::default();
        config.chrome_flags = vec!["--no-sandbox".to_string()];
        let args = config.launch_args();
        let options = BrowserManager::build_launch_options(&config, &args).unwrap();

        assert!(options
            .args
            .iter()
            .any(|arg| arg.to_string_lossy().contains("AutomationControlled")));
        assert!(options
            .args
            .iter()
            .any(|arg| arg.to_string_lossy() == "--no-sandbox"));
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_browser_manager_creation() {
        let manager = BrowserManager::new(BrowserConfig::default()).unwrap();
        assert!(manager.new_tab().is_ok());
    }
}
