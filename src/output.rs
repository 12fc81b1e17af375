use crate::error::{Error, Result};
use crate::models::{Organization, User};
use crate::pagination::MEMBERS_PAGE_SIZE;
use chrono::{DateTime, Datelike, Utc};
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

const BANNER: &str = "GitWho -- Simple GitHub information.";
const JSON_INDENT: &[u8] = b"    ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// A record that can be printed as text or exported as JSON
pub trait Presentable: Serialize {
    /// Identifying key, used to name the JSON export
    fn key(&self) -> &str;

    fn render(&self) -> String;
}

impl Presentable for User {
    fn key(&self) -> &str {
        &self.account.login
    }

    fn render(&self) -> String {
        render_user(self, Utc::now())
    }
}

impl Presentable for Organization {
    fn key(&self) -> &str {
        &self.account.login
    }

    fn render(&self) -> String {
        render_organization(self)
    }
}

/// Print a record, exporting it to `<key>.json` in `export_dir` when in JSON mode
///
/// A failed export is reported but does not prevent the JSON from being printed.
pub fn present<W: Write, P: Presentable>(
    out: &mut W,
    record: &P,
    format: Format,
    export_dir: &Path,
) -> Result<()> {
    match format {
        Format::Json => {
            let json = to_json(record)?;

            match export_json(export_dir, record.key(), &json) {
                Ok(path) => log::info!("Wrote {}", path.display()),
                Err(error) => log::error!("{}", error),
            }

            writeln!(out, "{}", json)?;
        }
        Format::Text => {
            write!(out, "{}", record.render())?;
        }
    }

    Ok(())
}

/// Serialize with four-space indentation
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `json` to `<dir>/<key>.json`, replacing any existing file
pub fn export_json(dir: &Path, key: &str, json: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", key));

    std::fs::write(&path, json).map_err(|source| Error::OutputWriteFailed {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

fn heading(title: &str) -> String {
    format!("{}\n", title.bold().underline())
}

fn line<L: Colorize, V: ToString>(label: L, value: V) -> String {
    format!("{} {}\n", label.bold(), value.to_string().bold())
}

fn link_line<L: Colorize>(label: L, url: &str) -> String {
    format!("{} {}\n", label.bold(), url.bold().underline())
}

pub fn render_user(user: &User, now: DateTime<Utc>) -> String {
    let account = &user.account;
    let mut text = format!("{}\n", BANNER.bold());

    text.push_str(&heading("General Info"));
    text.push_str(&line("- Real Name:".blue(), &account.name));
    text.push_str(&line("- Username:".blue(), &account.login));
    text.push_str(&line("- Bio:".blue(), &account.bio));
    text.push_str(&line("- Location:".blue(), &account.location));
    text.push_str(&link_line("- Website:".blue(), &account.website));
    text.push_str(&link_line("- Link:".blue(), &account.profile_url));

    text.push_str(&heading("Work Info"));
    text.push_str(&line("- Hireable:".magenta(), user.hireable));
    text.push_str(&line("- Organization:".magenta(), &user.company));

    text.push_str(&heading("By the numbers"));
    text.push_str(&line("- Public Repos:".cyan(), account.repos));
    text.push_str(&line("- Public Gists:".cyan(), account.gists));

    text.push_str(&heading("Community"));
    text.push_str(&line("- Followers:".green(), account.followers));
    text.push_str(&line("- Following:".green(), account.following));

    text.push_str(&heading("Dates"));
    text.push_str(&line(
        "- Last Active:".yellow(),
        dated(user.last_active, now),
    ));
    text.push_str(&line(
        "- Account Created:".yellow(),
        dated(user.account_created, now),
    ));

    text
}

pub fn render_organization(org: &Organization) -> String {
    let account = &org.account;
    let mut text = format!("{}\n", BANNER.bold());

    text.push_str(&heading("General Info"));
    text.push_str(&line("- Org Name:".blue(), &account.name));
    text.push_str(&line("- Username:".blue(), &account.login));
    text.push_str(&line("- Description:".blue(), &account.bio));
    text.push_str(&line("- Location:".blue(), &account.location));
    text.push_str(&link_line("- Website:".blue(), &account.website));
    text.push_str(&link_line("- Link:".blue(), &account.profile_url));

    text.push_str(&heading("By the numbers"));
    text.push_str(&line("- Public Repos:".cyan(), account.repos));
    text.push_str(&line("- Public Gists:".cyan(), account.gists));

    text.push_str(&heading("Community"));
    text.push_str(&line("- Public Members:".green(), member_count(org)));
    text.push_str(&line("- Followers:".green(), account.followers));
    text.push_str(&line("- Following:".green(), account.following));

    if let Some(members) = &org.org_members {
        text.push_str(&heading("Members"));

        let lines = members
            .iter()
            .map(|member| {
                if member.account.name.is_empty() {
                    format!("- {}", member.account.login)
                } else {
                    format!("- {} ({})", member.account.login, member.account.name)
                }
            })
            .join("\n");

        if !lines.is_empty() {
            text.push_str(&lines);
            text.push('\n');
        }
    }

    text
}

fn member_count(org: &Organization) -> String {
    match (org.public_member_count, &org.org_members) {
        (None, _) => "unknown".to_string(),
        (Some(count), None) if count == usize::from(MEMBERS_PAGE_SIZE) => format!(
            "{}+ (use --users to get total count - may take awhile)",
            count
        ),
        (Some(count), _) => count.to_string(),
    }
}

/// Relative time followed by the calendar date, e.g. `3 days ago (10/16/2026)`
fn dated(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!(
        "{} ({}/{}/{})",
        relative_time(time, now),
        time.month(),
        time.day(),
        time.year()
    )
}

/// Humanized distance between two times, e.g. `3 days ago` or `2 hours from now`
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let mut formatter = timeago::Formatter::new();

    match elapsed.to_std() {
        Ok(duration) => formatter.convert(duration),
        Err(_) => formatter
            .ago("from now")
            .convert((-elapsed).to_std().unwrap_or_default()),
    }
}
