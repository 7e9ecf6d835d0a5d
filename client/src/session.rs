//! Local persistence between invocations: the signed-in session (token +
//! user) and the id of the currently selected payment method, each in its
//! own file under the tiffin home directory. The selected payment method is
//! a display preference; it is never sent to the server on checkout.

use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::User;

const SESSION_FILE: &str = "session.json";
const PAYMENT_METHOD_FILE: &str = "payment_method";

fn home() -> PathBuf {
    env::var("TIFFIN_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".tiffin"))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

impl Session {
    pub fn load() -> Result<Option<Self>> {
        let path = home().join(SESSION_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let session = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt session file {}", path.display()))?;
        Ok(Some(session))
    }

    pub fn require() -> Result<Self> {
        Self::load()?.context("Not logged in, run `tiffin login` first")
    }

    pub fn save(&self) -> Result<()> {
        let dir = home();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join(SESSION_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Logout drops the session but leaves the payment preference alone.
    pub fn clear() -> Result<()> {
        let path = home().join(SESSION_FILE);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

pub fn selected_payment_method() -> Result<Option<String>> {
    let path = home().join(PAYMENT_METHOD_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let id = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(id.trim().to_string()))
}

pub fn select_payment_method(id: &str) -> Result<()> {
    let dir = home();
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(dir.join(PAYMENT_METHOD_FILE), id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::{select_payment_method, selected_payment_method, Session};
    use crate::models::User;

    #[test]
    fn session_and_payment_preference_round_trip() {
        let dir = env::temp_dir().join(format!("tiffin-session-test-{}", std::process::id()));
        env::set_var("TIFFIN_HOME", &dir);

        assert!(Session::load().unwrap().is_none());

        let session = Session {
            access_token: "abc.def.ghi".into(),
            user: User {
                id: "user-1".into(),
                name: "Thanos".into(),
                email: "thanos@example.com".into(),
                role: "MEMBER".into(),
                country: Some("INDIA".into()),
            },
        };
        session.save().unwrap();

        let loaded = Session::require().unwrap();
        assert_eq!(loaded.access_token, "abc.def.ghi");
        assert_eq!(loaded.user.email, "thanos@example.com");

        select_payment_method("pm-1").unwrap();
        assert_eq!(selected_payment_method().unwrap().as_deref(), Some("pm-1"));

        // Logout keeps the payment preference.
        Session::clear().unwrap();
        assert!(Session::load().unwrap().is_none());
        assert_eq!(selected_payment_method().unwrap().as_deref(), Some("pm-1"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
