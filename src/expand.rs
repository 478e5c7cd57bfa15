//! Home-directory and environment-variable expansion
//!
//! Expansion only rewrites the part of a path that lives on the filesystem.
//! Entry names inside an archive are left alone; a rewritten string is
//! resolved again, so expansion can reach an archive boundary only through
//! ordinary detection on the result.

use crate::path::{plain, ArchivePath, Path, SEP};
use std::borrow::Cow;

impl Path {
    /// Expand a leading `~` or `~user`
    ///
    /// Unknown users and undeterminable home directories leave the path
    /// unchanged. Archive paths are returned as they are.
    pub fn expand_user(&self) -> Path {
        match self {
            Path::Plain(p) => match expand_tilde(p.as_str()) {
                Cow::Borrowed(_) => self.clone(),
                Cow::Owned(expanded) => Path::new(expanded),
            },
            Path::Archive(_) => self.clone(),
        }
    }

    /// Substitute `$NAME` and `${NAME}` from the process environment
    ///
    /// Unset variables are left in place. For archive paths only the archive
    /// location is expanded.
    pub fn expand_vars(&self) -> Path {
        match self {
            Path::Plain(p) => match expand_env(p.as_str()) {
                Cow::Borrowed(_) => self.clone(),
                Cow::Owned(expanded) => Path::new(expanded),
            },
            Path::Archive(a) => match expand_env(a.location()) {
                Cow::Borrowed(_) => self.clone(),
                Cow::Owned(location) => reattach(a, &location),
            },
        }
    }
}

/// Re-resolve `location` with the original entry name appended
fn reattach(original: &ArchivePath, location: &str) -> Path {
    let mut full = location.to_string();
    if !original.is_root() {
        let entry = original.entry_name().replace('/', &SEP.to_string());
        full = plain::join(&full, &entry);
    }

    match (Path::new(full), original.password()) {
        (Path::Archive(a), Some(password)) => Path::Archive(a.with_password(password)),
        (resolved, _) => resolved,
    }
}

fn expand_env(input: &str) -> Cow<'_, str> {
    shellexpand::env_with_context_no_errors(input, |name| std::env::var(name).ok())
}

fn expand_tilde(input: &str) -> Cow<'_, str> {
    let rest = match input.strip_prefix('~') {
        Some(rest) => rest,
        None => return Cow::Borrowed(input),
    };

    let user_end = rest.find(|c: char| c == '/' || c == SEP).unwrap_or(rest.len());
    let (user, tail) = rest.split_at(user_end);

    if user.is_empty() {
        return shellexpand::tilde(input);
    }

    match user_home(user) {
        Some(home) => Cow::Owned(format!("{}{}", trim_home(&home), tail)),
        None => Cow::Borrowed(input),
    }
}

/// Drop trailing separators, except from the root directory itself
fn trim_home(home: &str) -> &str {
    let trimmed = home.trim_end_matches(SEP);
    if trimmed.is_empty() && !home.is_empty() {
        &home[..SEP.len_utf8()]
    } else {
        trimmed
    }
}

/// Home directory of `user` from the system user database
#[cfg(unix)]
fn user_home(user: &str) -> Option<String> {
    match nix::unistd::User::from_name(user) {
        Ok(Some(entry)) => entry.dir.to_str().map(str::to_string),
        Ok(None) => {
            tracing::trace!(user, "no passwd entry");
            None
        }
        Err(e) => {
            tracing::trace!(user, error = %e, "passwd lookup failed");
            None
        }
    }
}

#[cfg(not(unix))]
fn user_home(_user: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_expand_tilde_untouched_without_tilde() {
        assert!(matches!(expand_tilde("plain/path"), Cow::Borrowed(_)));
        assert!(matches!(expand_tilde("a/~b"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_trim_home_keeps_root() {
        let root = SEP.to_string();
        assert_eq!(trim_home(&root), root);
        assert_eq!(trim_home(&format!("{}{}", SEP, SEP)), root);
        assert_eq!(trim_home(&format!("{}home{}u{}", SEP, SEP, SEP)), format!("{}home{}u", SEP, SEP));
        assert_eq!(trim_home(""), "");
    }

    #[test]
    fn test_unknown_user_is_left_alone() {
        let p = Path::new("~no_such_user_hopefully_42/stuff");
        assert_eq!(p.expand_user(), "~no_such_user_hopefully_42/stuff");
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_bare_tilde_uses_home() {
        let home = std::env::var("HOME").unwrap();
        let expanded = Path::new("~/stuff").expand_user();
        assert_eq!(expanded, plain::join(&home, "stuff"));
    }

    #[test]
    #[serial]
    fn test_expand_vars() {
        std::env::set_var("PTH_EXPAND_TEST", "1");
        let expanded = Path::new("$PTH_EXPAND_TEST/stuff").expand_vars();
        assert_eq!(expanded, plain::join("1", "stuff"));

        let braced = Path::new("${PTH_EXPAND_TEST}x").expand_vars();
        assert_eq!(braced, "1x");
        std::env::remove_var("PTH_EXPAND_TEST");
    }

    #[test]
    #[serial]
    fn test_unset_vars_are_kept() {
        std::env::remove_var("PTH_SURELY_UNSET");
        let p = Path::new("$PTH_SURELY_UNSET/x");
        assert_eq!(p.expand_vars(), "$PTH_SURELY_UNSET/x");
    }
}
