use cafe_menu_client::Category;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tracing::debug;

use crate::app::{App, Screen};

/// Poll for keyboard events with timeout
pub fn poll_event(timeout_ms: u64) -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Everything a user can do, independent of which key triggered it
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SelectUp,
    SelectDown,
    NextCategory,
    PrevCategory,
    SwitchCategory(Category),
    ToggleSoldOut,
    BeginRename,
    RequestRemove,
    ConfirmRemove,
    FocusNameField,
    InputChar(char),
    InputBackspace,
    SubmitAdd,
    SubmitRename,
    Reload,
    Back,
    Dismiss,
    Quit,
}

/// Translate a terminal event into an action for the current screen
pub fn action_for(screen: &Screen, event: &Event) -> Option<Action> {
    let Event::Key(key) = event else {
        // Resize handled by ratatui automatically
        return None;
    };
    // Only handle key press events (not release)
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match screen {
        Screen::Browse => browse_action(key),
        Screen::Compose | Screen::Rename { .. } => input_action(screen, key),
        Screen::ConfirmRemove(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmRemove),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Back),
            _ => None,
        },
        // Any key dismisses the message
        Screen::Message(_, _) => Some(Action::Dismiss),
    }
}

fn browse_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectDown),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(Action::NextCategory),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Some(Action::PrevCategory),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            Some(Action::SwitchCategory(Category::ALL[index]))
        }
        KeyCode::Char('s') => Some(Action::ToggleSoldOut),
        KeyCode::Char('e') => Some(Action::BeginRename),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::RequestRemove),
        KeyCode::Char('a') | KeyCode::Char('i') => Some(Action::FocusNameField),
        // The form's submit control
        KeyCode::Enter => Some(Action::SubmitAdd),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn input_action(screen: &Screen, key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Enter if matches!(screen, Screen::Rename { .. }) => Some(Action::SubmitRename),
        KeyCode::Enter => Some(Action::SubmitAdd),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    }
}

/// Run the transition bound to `action`
pub async fn dispatch(app: &mut App, action: Action) -> anyhow::Result<()> {
    debug!(?action, "Dispatching action");

    match action {
        Action::SelectUp => app.select_up(),
        Action::SelectDown => app.select_down(),
        Action::NextCategory => {
            let next = app.active_category().next();
            app.select_category(next).await?;
        }
        Action::PrevCategory => {
            let prev = app.active_category().prev();
            app.select_category(prev).await?;
        }
        Action::SwitchCategory(category) => app.select_category(category).await?,
        Action::ToggleSoldOut => {
            if let Some(id) = app.selected_entry().map(|e| e.id.clone()) {
                app.toggle_sold_out(&id);
            }
        }
        Action::BeginRename => app.begin_rename(),
        Action::RequestRemove => app.request_remove(),
        Action::ConfirmRemove => {
            if let Screen::ConfirmRemove(id) = app.screen.clone() {
                app.remove_entry(&id);
            }
        }
        Action::FocusNameField => app.screen = Screen::Compose,
        Action::InputChar(c) => match &mut app.screen {
            Screen::Rename { input, .. } => input.push(c),
            _ => app.name_input.push(c),
        },
        Action::InputBackspace => match &mut app.screen {
            Screen::Rename { input, .. } => {
                input.pop();
            }
            _ => {
                app.name_input.pop();
            }
        },
        Action::SubmitAdd => app.add_entry().await?,
        Action::SubmitRename => {
            if let Screen::Rename { id, input } = app.screen.clone() {
                app.rename_entry(&id, &input).await?;
            }
        }
        Action::Reload => app.reload().await?,
        // Leaving the name field keeps what was typed
        Action::Back | Action::Dismiss => app.go_back(),
        Action::Quit => app.should_quit = true,
    }
    Ok(())
}

/// Handle one terminal event end to end
pub async fn handle_event(app: &mut App, event: Event) -> anyhow::Result<()> {
    if let Some(action) = action_for(&app.screen, &event) {
        dispatch(app, action).await?;
    }
    Ok(())
}
