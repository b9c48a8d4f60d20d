//! Human-oriented text rendering of a synthesized report.
//!
//! The layout groups actors by organization affiliation and closes with the
//! popular organizations section. The data shown here is exactly the
//! [`Report`] contract; rendering adds no derived facts of its own.

use colored::Colorize;
use jabbar_core::{Actor, OrgAggregate, RepoId, Report};

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

/// Renders the full text report.
pub fn render_text(repo: &RepoId, report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        format!("Social report for {}", repo).bold()
    ));

    if !report.org_affiliated.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!(
                "Members of public organizations ({}):",
                report.org_affiliated.len()
            )
            .green()
        ));
        for actor in &report.org_affiliated {
            out.push_str(&format!(
                "  {}: {}\n",
                actor_label(actor),
                org_list(actor)
            ));
        }
    }

    if !report.company_only.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!("With a company field ({}):", report.company_only.len()).green()
        ));
        for actor in &report.company_only {
            let company = actor.company.as_deref().unwrap_or_default();
            out.push_str(&format!("  {}: {}\n", actor_label(actor), company.trim()));
        }
    }

    if !report.unaffiliated.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!("No public affiliation ({}):", report.unaffiliated.len()).green()
        ));
        for actor in &report.unaffiliated {
            out.push_str(&format!("  {}\n", actor_label(actor)));
        }
    }

    if !report.organizations.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!(
                "Organizations that forked ({}):",
                report.organizations.len()
            )
            .green()
        ));
        for actor in &report.organizations {
            out.push_str(&format!("  {}\n", actor_label(actor)));
        }
    }

    out.push_str(&format!("\n{}\n", "Popular organizations:".green()));
    if report.popular_orgs.is_empty() {
        out.push_str("  No organization is shared by more than one actor.\n");
    } else {
        for org in &report.popular_orgs {
            out.push_str(&format!(
                "  {}, {} members: {}\n",
                org_label(org),
                org.users.len(),
                org.users.join(", ")
            ));
        }
    }

    out
}

/// `@login` plus the display name when one is known.
fn actor_label(actor: &Actor) -> String {
    let login = format!("@{}", actor.login).cyan().to_string();
    match actor.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("{} ({})", login, name),
        _ => login,
    }
}

fn org_label(org: &OrgAggregate) -> String {
    match org.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("{} (@{})", name, org.login),
        _ => format!("@{}", org.login),
    }
}

/// Comma-separated org memberships for one actor, with a trailing marker
/// when the one fetched page did not cover them all.
fn org_list(actor: &Actor) -> String {
    let mut parts: Vec<String> = actor
        .organizations
        .iter()
        .map(|org| match org.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} (@{})", name, org.login),
            _ => format!("@{}", org.login),
        })
        .collect();

    let shown = parts.len() as u64;
    if actor.organizations_total_count > shown {
        parts.push(format!(
            "and {} more",
            actor.organizations_total_count - shown
        ));
    }
    parts.join(", ")
}
