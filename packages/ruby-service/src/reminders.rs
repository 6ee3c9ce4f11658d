use crate::{Error, NotificationRequest, Result, RubyService};

const PERMISSION_ALERT_TITLE: &str = "Thông báo";
const PERMISSION_ALERT: &str = "Bạn cần cấp quyền thông báo để nhận nhắc nhở";

impl RubyService {
	/// Schedules one non-repeating notification `delay_seconds` from now and returns its id.
	pub async fn schedule_reminder(&self, delay_seconds: i64, content: &str) -> Result<String> {
		let delay_seconds = u64::try_from(delay_seconds)
			.ok()
			.filter(|delay| *delay > 0)
			.ok_or_else(|| Error::InvalidRequest {
				message: "Reminder delay must be positive.".to_string(),
			})?;
		let request = NotificationRequest {
			title: self.cfg.reminders.title.clone(),
			body: content.to_string(),
			delay_seconds,
			repeats: false,
		};
		let id = self.collaborators.notifications.schedule(&request).await?;

		tracing::info!(%id, delay_seconds, "Reminder scheduled.");

		Ok(id)
	}

	/// Like [`RubyService::schedule_reminder`], but a refused schedule alerts the user and
	/// yields `None` instead of failing the turn.
	pub(crate) async fn try_schedule_reminder(
		&self,
		delay_seconds: i64,
		content: &str,
	) -> Option<String> {
		match self.schedule_reminder(delay_seconds, content).await {
			Ok(id) => Some(id),
			Err(err) => {
				tracing::warn!(error = %err, "Failed to schedule reminder.");

				self.alert((PERMISSION_ALERT_TITLE.to_string(), PERMISSION_ALERT.to_string())).await;

				None
			},
		}
	}
}
