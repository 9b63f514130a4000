use super::*;

/// Promotes the configured accounts to administrators.
///
/// Runs at startup. Accounts that do not exist yet are skipped
/// with a warning, they can be promoted on the next restart after
/// registering.
pub fn bootstrap_admins(
    connections: &sqlite::Connections,
    admin_emails: &[EmailAddress],
) -> Result<()> {
    if admin_emails.is_empty() {
        return Ok(());
    }
    let db = connections.exclusive()?;
    for email in admin_emails {
        match db.try_get_user_by_email(email.as_str())? {
            Some(user) => {
                if user.role >= Role::Admin {
                    continue;
                }
                info!("Promoting '{email}' to admin");
                db.update_user(&User {
                    role: Role::Admin,
                    ..user
                })?;
            }
            None => {
                warn!("Cannot promote '{email}': no account with this e-mail address");
            }
        }
    }
    Ok(())
}
