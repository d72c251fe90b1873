use std::io::{BufRead, Write};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use log::{debug, info};

use crate::model::menu::{InputStreamComponent, PlayableItem};

/// Boundary to the host media player: dialogs, notifications, component
/// availability and playback handoff. Route handlers only ever talk to this
/// trait; the real add-on shell and the console runner plug in here.
pub trait HostBridge {
    fn text_input(&self, prompt: &str, default: &str) -> Option<String>;
    fn secret_input(&self, prompt: &str) -> Option<String>;
    fn confirm(&self, message: &str, yes_label: &str, no_label: &str) -> bool;
    /// Modal message, blocks until acknowledged.
    fn show_message(&self, message: &str);
    /// Non-blocking toast.
    fn notify(&self, heading: &str, message: &str, icon: Option<&str>);
    fn select(&self, heading: &str, options: &[String]) -> Option<usize>;
    /// Ask the host to redraw the current listing.
    fn refresh(&self);
    fn has_component(&self, component: InputStreamComponent) -> bool;
    fn play(&self, item: &PlayableItem);
}

/// Console implementation backing the CLI binary.
pub struct ConsoleHost;

impl ConsoleHost {
    fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}: ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(String::from(line.trim())),
            Err(_) => None,
        }
    }
}

impl HostBridge for ConsoleHost {
    fn text_input(&self, prompt: &str, default: &str) -> Option<String> {
        let prompt = if default.is_empty() {
            String::from(prompt)
        } else {
            format!("{prompt} [{default}]")
        };
        match self.read_line(&prompt) {
            Some(value) if value.is_empty() => Some(String::from(default)),
            other => other,
        }
    }

    fn secret_input(&self, prompt: &str) -> Option<String> {
        rpassword::prompt_password(format!("{prompt}: ")).ok().filter(|s| !s.is_empty())
    }

    fn confirm(&self, message: &str, yes_label: &str, no_label: &str) -> bool {
        matches!(
            self.read_line(&format!("{message} ({yes_label}/{no_label}) [y/n]")).as_deref(),
            Some("y" | "Y" | "yes")
        )
    }

    fn show_message(&self, message: &str) {
        println!("{message}");
    }

    fn notify(&self, heading: &str, message: &str, _icon: Option<&str>) {
        info!("{heading}: {message}");
    }

    fn select(&self, heading: &str, options: &[String]) -> Option<usize> {
        println!("{heading}");
        for (index, option) in options.iter().enumerate() {
            println!("  {index}: {option}");
        }
        self.read_line("select")?
            .parse::<usize>()
            .ok()
            .filter(|index| *index < options.len())
    }

    fn refresh(&self) {
        debug!("refresh requested");
    }

    fn has_component(&self, _component: InputStreamComponent) -> bool {
        true
    }

    fn play(&self, item: &PlayableItem) {
        println!("PLAY {}", item.url);
        if let Some(component) = item.input_stream {
            println!("  inputstream: {} ({})", component.addon_id(), component.manifest_type());
        }
        if let Some(resume) = item.resume_time_secs {
            println!("  resume from: {resume}s");
        }
    }
}

/// Abort-aware wait primitive for the background service loop, the host
/// signals shutdown through `abort()`.
#[derive(Default)]
pub struct ShutdownMonitor {
    aborted: Mutex<bool>,
    signal: Condvar,
}

impl ShutdownMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        let mut aborted = self.aborted.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *aborted = true;
        self.signal.notify_all();
    }

    /// Waits up to `timeout`, returns `true` when shutdown was signalled.
    pub fn wait_for_abort(&self, timeout: Duration) -> bool {
        let guard = self.aborted.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let (guard, _) = self
            .signal
            .wait_timeout_while(guard, timeout, |aborted| !*aborted)
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard
    }
}
