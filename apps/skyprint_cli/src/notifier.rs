use async_trait::async_trait;
use skyprint::alerts::{Notifier, Permission};
use skyprint::transits::Alert;
use std::io::{IsTerminal, Write};

/// Prints alerts to the terminal with a bell. Only usable on an interactive stdout.
pub struct TerminalNotifier;

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn request_permission(&self) -> Permission {
        if std::io::stdout().is_terminal() {
            Permission::Granted
        } else {
            Permission::Unsupported
        }
    }

    fn notify(&self, alert: &Alert) {
        let mut stdout = std::io::stdout();
        let stamp = chrono::Local::now().format("%H:%M");
        if let Err(e) = writeln!(stdout, "\x07[{}] {}: {}", stamp, alert.title, alert.body) {
            log::error!("TerminalNotifier: failed to write alert: {}", e);
        }
    }
}
