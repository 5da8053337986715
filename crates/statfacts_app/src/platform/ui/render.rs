use chrono::{DateTime, Utc};
use statfacts_core::{AppViewModel, FunFactView, ProfileView, Screen};

/// Renders the view model as terminal lines, ending with the input prompt.
pub fn render(view: &AppViewModel, generated_at: Option<DateTime<Utc>>) -> Vec<String> {
    match view.screen {
        Screen::InputForm => render_input_form(view),
        Screen::Loading => vec![view.status.clone()],
        Screen::Failed => {
            let mut lines = vec![view.status.clone()];
            lines.push(String::new());
            lines.extend(render_input_form(view).into_iter().skip(1));
            lines
        }
        Screen::Results => render_results(view, generated_at),
    }
}

fn render_input_form(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", view.status)];
    let hint = if view.username_input.trim().is_empty() {
        "Type a GitHub username and press Enter. `q` quits.".to_string()
    } else {
        format!(
            "Press Enter to generate facts for {}, or type another username. `q` quits.",
            view.username_input.trim()
        )
    };
    lines.push(hint);
    if !view.generate_enabled {
        lines.push("(a lookup is already running)".to_string());
    }
    lines
}

fn render_results(view: &AppViewModel, generated_at: Option<DateTime<Utc>>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(profile) = &view.profile {
        lines.extend(render_profile(profile));
    }
    if let Some(username) = &view.calendar_username {
        lines.push(format!("Contributions: https://github.com/{username}"));
    }

    lines.push(String::new());
    lines.push("Funny Statistics:".to_string());
    if view.facts.is_empty() {
        lines.push("  ...".to_string());
    }
    for fact in &view.facts {
        lines.extend(render_fact(fact));
    }

    lines.push(String::new());
    if let Some(at) = generated_at {
        lines.push(format!("Generated {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    lines.push("Press Enter to check another user, or `q` to quit.".to_string());
    lines
}

fn render_profile(profile: &ProfileView) -> Vec<String> {
    vec![
        profile.username.clone(),
        format!(
            "github.com/{} <{}>",
            profile.username, profile.profile_url
        ),
        format!("Avatar: {}", profile.avatar_url),
        format!(
            "Repositories {} | Stars {} | Followers {}",
            format_with_commas(profile.repositories),
            format_with_commas(profile.stars),
            format_with_commas(profile.followers)
        ),
    ]
}

fn render_fact(fact: &FunFactView) -> Vec<String> {
    vec![
        format!("  [{} - {}]", fact.label, format_with_commas(fact.count)),
        format!("    {}", fact.text),
    ]
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn results_view() -> AppViewModel {
        AppViewModel {
            screen: Screen::Results,
            username_input: "octocat".to_string(),
            generate_enabled: false,
            status: "Stats for octocat".to_string(),
            profile: Some(ProfileView {
                username: "octocat".to_string(),
                avatar_url: "https://avatars.example/octocat".to_string(),
                profile_url: "https://github.com/octocat".to_string(),
                repositories: 8,
                followers: 1500,
                stars: 10,
            }),
            facts: vec![FunFactView {
                label: "Repositories".to_string(),
                count: 8,
                text: "With 8 repositories, 8 is a cube.".to_string(),
            }],
            calendar_username: Some("octocat".to_string()),
            dirty: true,
        }
    }

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1234567), "1,234,567");
    }

    #[test]
    fn results_show_stats_and_facts() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let lines = render(&results_view(), Some(at));

        assert_eq!(lines[0], "octocat");
        assert!(lines.contains(&"Repositories 8 | Stars 10 | Followers 1,500".to_string()));
        assert!(lines.contains(&"Contributions: https://github.com/octocat".to_string()));
        assert!(lines.contains(&"  [Repositories - 8]".to_string()));
        assert!(lines.contains(&"    With 8 repositories, 8 is a cube.".to_string()));
        assert!(lines.contains(&"Generated 2026-10-19 08:30:00 UTC".to_string()));
    }

    #[test]
    fn input_form_offers_prefilled_username() {
        let view = AppViewModel {
            screen: Screen::InputForm,
            username_input: "ghana7989".to_string(),
            generate_enabled: true,
            status: "Let's see Facts about your Stats".to_string(),
            ..AppViewModel::default()
        };
        let lines = render(&view, None);

        assert_eq!(lines[0], "== Let's see Facts about your Stats ==");
        assert!(lines[1].contains("generate facts for ghana7989"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn loading_shows_only_status() {
        let view = AppViewModel {
            screen: Screen::Loading,
            status: "Fetching profile for octocat...".to_string(),
            ..AppViewModel::default()
        };
        assert_eq!(render(&view, None), vec!["Fetching profile for octocat...".to_string()]);
    }

    #[test]
    fn failure_shows_reason_then_form() {
        let view = AppViewModel {
            screen: Screen::Failed,
            username_input: "ghost".to_string(),
            generate_enabled: true,
            status: "No results for ghost (user not found). Try again.".to_string(),
            ..AppViewModel::default()
        };
        let lines = render(&view, None);

        assert_eq!(lines[0], "No results for ghost (user not found). Try again.");
        assert!(lines.iter().any(|line| line.contains("generate facts for ghost")));
    }
}
