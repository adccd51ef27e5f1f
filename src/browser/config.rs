use serde::Deserialize;
use std::time::Duration;

/// Configuration for the automation browser
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Browser window size; the reviews and filmography pages lay out
    /// lazily, so a desktop-sized window keeps their sections rendered
    #[serde(default = "default_window_size")]
    pub window_size: (u32, u32),

    /// User agent sent with every request; empty keeps Chrome's own
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Seconds without DevTools traffic before the browser is considered dead
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,

    /// Disable image loading for performance
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Additional Chrome flags
    #[serde(default)]
    pub chrome_flags: Vec<String>,
}

fn default_true() -> bool { true }
fn default_window_size() -> (u32, u32) { (1920, 1080) }
fn default_idle_timeout() -> u64 { 120 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
        .to_string()
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: default_window_size(),
            user_agent: default_user_agent(),
            idle_timeout_seconds: default_idle_timeout(),
            disable_images: true,
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Same configuration with a visible browser rendering images, for debugging
    pub fn debug_mode(self) -> Self {
        Self {
            headless: false,
            disable_images: false,
            ..self
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }

    /// Every Chrome argument implied by this configuration
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-blink-features=AutomationControlled".to_string(),
            "--disable-dev-shm-usage".to_string(),
        ];
        if self.disable_images {
            args.push("--blink-settings=imagesEnabled=false".to_string());
        }
        if !self.user_agent.is_empty() {
            args.push(format!("--user-agent={}", self.user_agent));
        }
        args.extend(self.chrome_flags.iter().cloned());
        args
    }
}
