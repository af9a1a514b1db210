//! UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use veidt_core::Plan;

use super::app::{App, Field, SignupDialog};

/// Captions for the landing gallery, in image order
const SLIDE_CAPTIONS: [&str; 3] = [
    "Primary care at in-network clinics",
    "Lab studies at member prices",
    "Specialists close to home",
];

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 4;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, outer_chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer_chunks[1]);

    let hero_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(body_chunks[0]);

    draw_hero(frame, app, hero_chunks[0]);
    draw_gallery(frame, app, hero_chunks[1]);
    draw_pricing(frame, body_chunks[1]);
    draw_status_bar(frame, app, outer_chunks[2]);

    if let Some(dialog) = app.signup.content() {
        draw_signup_dialog(frame, dialog);
    }

    if app.show_help {
        draw_help_overlay(frame);
    }

    // Toasts sit above everything else
    draw_toasts(frame, app);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "Veidt Health",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  ·  health membership",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    let header = Paragraph::new(title).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_hero(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Care for your whole family, for a few dollars a month.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Discounts on consultations, studies and specialists at our"),
        Line::from(format!(
            "partner clinics. Up to {} beneficiaries per membership.",
            Plan::MAX_BENEFICIARIES
        )),
        Line::from(""),
    ];

    match &app.member {
        Some(member) => lines.push(Line::from(Span::styled(
            format!("Welcome, {}! Your membership is active.", member.name),
            Style::default().fg(Color::Green),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Press 1 or 2 to pick a plan and join.",
            Style::default().fg(Color::Yellow),
        ))),
    }

    let hero = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    frame.render_widget(hero, area);
}

fn draw_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let rotator = &app.rotator;
    let index = rotator.index();

    let caption = SLIDE_CAPTIONS.get(index).copied().unwrap_or_default();
    let url = rotator.current().unwrap_or_default();

    let dots: Vec<Span> = (0..rotator.len())
        .map(|i| {
            if i == index {
                Span::styled("● ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("○ ", Style::default().add_modifier(Modifier::DIM))
            }
        })
        .collect();

    let content = vec![
        Line::from(Span::styled(
            caption,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            url,
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(dots),
    ];

    let paused = if rotator.is_running() { "" } else { "(paused) " };
    let title = format!(" Gallery {}/{} {}", index + 1, rotator.len(), paused);
    let gallery = Paragraph::new(content)
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(gallery, area);
}

fn draw_pricing(frame: &mut Frame, area: Rect) {
    let card_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (i, (plan, card_area)) in Plan::ALL.iter().zip(card_chunks.iter()).enumerate() {
        draw_plan_card(frame, *plan, i + 1, *card_area);
    }
}

fn draw_plan_card(frame: &mut Frame, plan: Plan, shortcut: usize, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("${}", plan.monthly_price()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" / month"),
        ]),
        Line::from(Span::styled(
            plan.tagline(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    for feature in plan.features() {
        lines.push(Line::from(format!("• {}", feature)));
    }
    lines.push(Line::from(format!(
        "Estimated savings: {}%",
        plan.discount_percent()
    )));
    lines.push(Line::from(Span::styled(
        format!("Press {} to join", shortcut),
        Style::default().fg(Color::Yellow),
    )));

    let mut title = vec![Span::styled(
        format!(" {} ", plan.name()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    let border_style = if plan.is_popular() {
        title.push(Span::styled(
            "[most popular] ",
            Style::default().fg(Color::Magenta),
        ));
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Line::from(title))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if app.signup.is_open() {
        "tab:next field  enter:register  esc:close"
    } else {
        "1/2:join plan  h/l:images  p:pause  x:dismiss  ?:help  q:quit"
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Draw the signup dialog centered over the landing page
fn draw_signup_dialog(frame: &mut Frame, dialog: &SignupDialog) {
    let popup_area = centered_rect(frame.area(), 52, 12);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Plan: "),
            Span::styled(
                dialog.plan.name(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}% off)", dialog.plan.discount_percent()),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(""),
    ];

    for field in Field::ALL {
        let value = dialog.value(field);
        let shown = match field {
            Field::Password => "•".repeat(value.chars().count()),
            _ => value.to_string(),
        };
        let focused = field == dialog.focus;
        let marker = if focused { "▸ " } else { "  " };
        let value_style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:<10}", field.label()),
                Style::default().add_modifier(Modifier::DIM),
            ),
            Span::styled(format!("{} ", shown), value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to register · Esc to close",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" Join Veidt ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Stack toasts in the bottom-right corner, newest at the bottom
fn draw_toasts(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let toasts = app.toasts.snapshot();
    if toasts.is_empty() || area.width < TOAST_WIDTH || area.height < TOAST_HEIGHT + 1 {
        return;
    }

    let max_visible = ((area.height - 1) / TOAST_HEIGHT) as usize;
    let visible = &toasts[toasts.len().saturating_sub(max_visible)..];

    // Leave the status bar visible
    let mut y = area.height - 1;
    for toast in visible.iter().rev() {
        y -= TOAST_HEIGHT;
        let toast_area = Rect::new(area.width - TOAST_WIDTH, y, TOAST_WIDTH, TOAST_HEIGHT);
        frame.render_widget(Clear, toast_area);

        let style = if toast.title.contains("error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        let content = vec![
            Line::from(Span::styled(
                toast.title.as_str(),
                style.add_modifier(Modifier::BOLD),
            )),
            Line::from(toast.description.as_str()),
        ];
        let paragraph = Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, toast_area);
    }
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(frame.area(), 50, 19);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Landing page:"),
        Line::from("  1 / 2        Join Esencial / Pleno"),
        Line::from("  a, Enter     Join the default plan"),
        Line::from("  h/l, [/]     Previous / next image"),
        Line::from("  p            Pause / resume gallery"),
        Line::from("  x            Dismiss oldest notification"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from("Signup dialog:"),
        Line::from("  Tab, ↑/↓     Move between fields"),
        Line::from("  Enter        Register"),
        Line::from("  Esc          Close"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )])
        .alignment(Alignment::Center),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}

/// Rect of at most `width` x `height` centered in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use veidt_core::Config;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 50, 20), Rect::new(25, 10, 50, 20));

        // Shrinks to fit small terminals
        let small = Rect::new(0, 0, 20, 10);
        let popup = centered_rect(small, 50, 20);
        assert_eq!((popup.width, popup.height), (16, 6));
    }

    #[test]
    fn test_landing_shows_both_plans() {
        let app = App::new(&Config::default());
        let screen = render(&app);

        assert!(screen.contains("Esencial $1"));
        assert!(screen.contains("Pleno $2"));
        assert!(screen.contains("Gallery 1/3"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dialog_and_toasts_render() {
        let mut app = App::new(&Config::default());
        app.open_signup(Plan::Pleno);
        app.toasts.add("Registration error", "Invalid email");

        let screen = render(&app);
        assert!(screen.contains("Join Veidt"));
        assert!(screen.contains("Registration error"));
    }
}
