use statfacts_core::{Msg, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Dispatch(Vec<Msg>),
    Ignore,
}

/// Maps one line typed on the terminal to messages for the current screen.
pub fn interpret(line: &str, screen: Screen) -> Command {
    let input = line.trim();
    if matches!(input.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
        return Command::Quit;
    }

    match screen {
        Screen::InputForm => {
            if input.is_empty() {
                Command::Dispatch(vec![Msg::GenerateClicked])
            } else {
                Command::Dispatch(submit(input))
            }
        }
        Screen::Failed | Screen::Results => {
            if input.is_empty() || input.eq_ignore_ascii_case("again") {
                Command::Dispatch(vec![Msg::CheckAnotherClicked])
            } else if screen == Screen::Failed {
                Command::Dispatch(submit(input))
            } else {
                let mut msgs = vec![Msg::CheckAnotherClicked];
                msgs.extend(submit(input));
                Command::Dispatch(msgs)
            }
        }
        Screen::Loading => Command::Ignore,
    }
}

fn submit(username: &str) -> Vec<Msg> {
    vec![
        Msg::UsernameChanged(username.to_string()),
        Msg::GenerateClicked,
    ]
}
