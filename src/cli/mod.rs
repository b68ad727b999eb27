pub mod seeder;

use anyhow::Context;
use dialoguer::{Input, Password};

use classrank_models::{ChangePasswordDto, LeaderboardRow, ReportCard, Role, Session};
use classrank_store::SaveStatus;

use crate::modules::AuthService;
use crate::state::AppState;

/// Use the given value or ask for it on the terminal.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

/// Use the given password or ask for it without echo.
pub fn password_or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Password::new()
            .with_prompt(prompt)
            .interact()
            .context("Failed to read password"),
    }
}

/// Ask for a new password twice.
pub fn read_new_password() -> anyhow::Result<String> {
    Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm password", "Passwords don't match")
        .interact()
        .context("Failed to read new password")
}

/// Print a warning when a change could not be written to disk.
pub fn report_save(save: &SaveStatus) {
    if let Some(warning) = save.warning() {
        eprintln!("⚠️  {}", warning);
    }
}

/// Log in as a faculty, prompting for anything not supplied.
pub fn login_faculty(
    state: &AppState,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<Session> {
    let username = value_or_prompt(username, "Username")?;
    let password = password_or_prompt(password, "Password")?;
    let outcome = AuthService::authenticate(state.snapshot(), Role::Faculty, &username, &password)?;
    Ok(outcome.session)
}

/// Log in as a student. A pending first login forces a password change
/// before the session is handed back.
pub fn login_student(
    state: &mut AppState,
    student_id: Option<String>,
    password: Option<String>,
) -> anyhow::Result<Session> {
    let student_id = value_or_prompt(student_id, "Student ID")?;
    let password = password_or_prompt(password, "Password")?;
    let outcome = AuthService::authenticate(state.snapshot(), Role::Student, &student_id, &password)?;

    if outcome.first_login_pending {
        println!("First login: please set a new password.");
        let new_password = read_new_password()?;
        let committed = AuthService::change_password(
            state,
            &outcome.session,
            outcome.session.key(),
            ChangePasswordDto::new(new_password),
        )?;
        report_save(&committed.save);
        println!("✅ Password changed");
    }

    Ok(outcome.session)
}

/// Plain-text leaderboard, one line per student.
pub fn render_leaderboard(subjects: &[String], rows: &[LeaderboardRow]) -> String {
    let mut header = vec![
        "Rank".to_string(),
        "Student ID".to_string(),
        "Name".to_string(),
        "Roll".to_string(),
    ];
    header.extend(subjects.iter().cloned());
    header.push("Total".to_string());

    let mut lines = vec![header];
    for row in rows {
        let mut line = vec![
            row.rank.to_string(),
            row.student_id.to_string(),
            row.name.clone(),
            row.roll_no.clone(),
        ];
        line.extend(row.marks.iter().map(|m| m.to_string()));
        line.push(row.total.to_string());
        lines.push(line);
    }

    render_columns(&lines)
}

/// Plain-text report card.
pub fn render_report_card(card: &ReportCard) -> String {
    let mut out = format!(
        "{} ({})\nClass: {}\nRoll: {}\n",
        card.name,
        card.student_id,
        card.class_name.as_deref().unwrap_or("-"),
        card.roll_no
    );
    if card.marks.is_empty() {
        out.push_str("No subjects recorded\n");
    } else {
        let lines: Vec<Vec<String>> = std::iter::once(vec!["Subject".into(), "Mark".into()])
            .chain(
                card.marks
                    .iter()
                    .map(|m| vec![m.subject.clone(), m.mark.to_string()]),
            )
            .collect();
        out.push_str(&render_columns(&lines));
    }
    out.push_str(&format!("Total: {}\n", card.total));
    match card.rank {
        Some(rank) => out.push_str(&format!("Rank: {}\n", rank)),
        None => out.push_str("Rank: -\n"),
    }
    out
}

/// Left-align cells into columns padded to the widest cell.
fn render_columns(lines: &[Vec<String>]) -> String {
    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            lines
                .iter()
                .filter_map(|line| line.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}
