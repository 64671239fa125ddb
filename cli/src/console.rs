use {
  kudos_client::{Notification, NotificationSink, Status},
  tracing::{error, info, warn},
};

/// Prints notifications to stdout, one per line.
pub struct ConsoleToasts {
  json: bool,
}

impl ConsoleToasts {
  pub fn new(json: bool) -> Self {
    Self { json }
  }
}

impl NotificationSink for ConsoleToasts {
  fn show(&self, notification: Notification) {
    match notification.status {
      Status::Warning => warn!("{}", notification.title),
      Status::Success => info!("{}", notification.title),
      Status::Error => error!("{}", notification.title),
    }

    if self.json {
      match serde_json::to_string(&notification) {
        Ok(line) => println!("{line}"),
        Err(e) => error!("failed to render notification: {e}"),
      }
    } else {
      println!(
        "[{}] {}\n  {}",
        notification.status, notification.title, notification.description
      );
    }
  }
}
