use super::{Notice, NOTIFY_SUBJECT};
use crate::command;
use crate::config::SmtpConfig;
use crate::error::CommandError;

/// Mails `notice` through the configured relay using curl's SMTP client.
pub async fn send(smtp: &SmtpConfig, notice: &Notice) -> Result<(), CommandError> {
    let mut args = vec![
        "--silent".to_string(),
        "--show-error".to_string(),
        "--url".to_string(),
        format!("smtp://{}:{}", smtp.server, smtp.port),
        "--mail-from".to_string(),
        smtp.from.clone(),
        "--mail-rcpt".to_string(),
        smtp.to.clone(),
        "--upload-file".to_string(),
        "-".to_string(),
    ];
    if let Some(user) = &smtp.user {
        args.push("--user".to_string());
        args.push(format!(
            "{}:{}",
            user,
            smtp.password.as_deref().unwrap_or_default()
        ));
    }

    command::run_with_input("curl", &args, message(smtp, notice).as_bytes()).await?;
    Ok(())
}

fn message(smtp: &SmtpConfig, notice: &Notice) -> String {
    format!(
        "From: {}\r\nTo: {}\r\nSubject: {}\r\n\r\n{}\r\n",
        smtp.from,
        smtp.to,
        NOTIFY_SUBJECT,
        notice.body()
    )
}
