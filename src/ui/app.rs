//! Main UI Application
//!
//! Draws a `Snapshot` with ratatui: map, message log, status sidebar, the
//! inventory overlay and the two final screens.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::entities::{Archetype, Position};
use crate::game::{InputMode, MessageCategory, Snapshot, TurnPhase};

/// Truncate a string to fit within max_len characters, adding "…" if truncated
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Text bar like `[####----]`, `width` cells between the brackets
fn progress_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn rgb(c: (u8, u8, u8)) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Main UI application
pub struct App {
    /// Lines of the message log to keep on screen
    message_lines: u16,
}

impl App {
    pub fn new() -> Self {
        Self { message_lines: 7 }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        match snapshot.phase {
            TurnPhase::GameOver => self.render_game_over(frame, snapshot),
            TurnPhase::GameWon => self.render_victory(frame, snapshot),
            _ => self.render_playing(frame, snapshot),
        }
    }

    fn render_playing(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let area = frame.area();

        // Main layout: sidebar on right
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(28)])
            .split(area);

        // Map area with message log at bottom
        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(self.message_lines)])
            .split(chunks[0]);

        self.render_map(frame, snapshot, left_chunks[0]);
        self.render_messages(frame, snapshot, left_chunks[1]);
        self.render_sidebar(frame, snapshot, chunks[1]);

        if snapshot.mode == InputMode::Inventory {
            self.render_inventory_overlay(frame, snapshot);
        }
    }

    fn render_map(&self, frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Depth {} ", snapshot.depth))
            .border_style(Style::default().fg(Color::Rgb(104, 88, 72)));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let view_width = inner.width as i32;
        let view_height = inner.height as i32;
        let cam_x = camera_origin(snapshot.player.position.x, view_width, snapshot.map.width);
        let cam_y = camera_origin(snapshot.player.position.y, view_height, snapshot.map.height);

        let buf = frame.buffer_mut();
        for screen_y in 0..view_height.min(snapshot.map.height) {
            for screen_x in 0..view_width.min(snapshot.map.width) {
                let pos = Position::new(cam_x + screen_x, cam_y + screen_y);
                let Some(tile) = snapshot.map.get_tile(pos.x, pos.y) else {
                    continue;
                };
                let cell_x = inner.x + screen_x as u16;
                let cell_y = inner.y + screen_y as u16;

                let fg = if snapshot.player.position == pos {
                    Color::Rgb(255, 255, 200)
                } else if let Some(monster) = snapshot.monster_at(pos) {
                    let pct = monster.hp as f32 / monster.max_hp.max(1) as f32;
                    if pct > 0.6 {
                        rgb(monster.archetype.def().fg)
                    } else if pct > 0.3 {
                        // Wounded - yellow tint
                        Color::Rgb(255, 200, 100)
                    } else {
                        Color::Rgb(255, 80, 80)
                    }
                } else if snapshot.chests.contains(&pos) {
                    Color::Rgb(220, 180, 60)
                } else if snapshot.stairs == pos {
                    Color::Rgb(120, 200, 255)
                } else {
                    rgb(tile.fg_color())
                };

                let cell = &mut buf[(cell_x, cell_y)];
                cell.set_char(snapshot.glyph_at(pos));
                cell.set_fg(fg);
                cell.set_bg(rgb(tile.bg_color()));
            }
        }
    }

    fn render_messages(&self, frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = snapshot
            .messages
            .iter()
            .rev()
            .take(inner.height as usize)
            .rev()
            .map(|msg| {
                let color = match msg.category {
                    MessageCategory::Combat => Color::Red,
                    MessageCategory::Item => Color::Yellow,
                    MessageCategory::System => Color::Cyan,
                };
                Line::from(Span::styled(msg.text.as_str(), Style::default().fg(color)))
            })
            .collect();

        let para = Paragraph::new(messages).block(block);
        frame.render_widget(para, area);
    }

    fn render_sidebar(&self, frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let player = &snapshot.player;
        let hp_pct = player.hp_fraction;
        let hp_color = if hp_pct > 0.6 {
            Color::Green
        } else if hp_pct > 0.3 {
            Color::Yellow
        } else {
            Color::Red
        };

        let label = Style::default().fg(Color::Gray);
        let mut lines = vec![
            Line::from(Span::styled(player.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Depth: ", label),
                Span::raw(format!("{}/{}", snapshot.depth, snapshot.max_depth)),
            ]),
            Line::from(vec![
                Span::styled("HP:    ", label),
                Span::styled(format!("{}/{}", player.hp, player.max_hp), Style::default().fg(hp_color)),
            ]),
            Line::from(vec![Span::styled("Atk:   ", label), Span::raw(player.attack.to_string())]),
            Line::from(vec![Span::styled("Def:   ", label), Span::raw(player.defense.to_string())]),
            Line::from(vec![Span::styled("Level: ", label), Span::raw(player.level.to_string())]),
            Line::from(vec![
                Span::styled("Exp:   ", label),
                Span::raw(format!("{}/{}", player.experience, player.next_level_exp)),
            ]),
            Line::from(vec![
                Span::raw("       "),
                Span::styled(progress_bar(player.exp_progress, 12), Style::default().fg(Color::Magenta)),
            ]),
            Line::from(""),
            Line::from(Span::styled("Equipped", Style::default().fg(Color::Cyan))),
        ];

        let width = inner.width.saturating_sub(2) as usize;
        let equipped: Vec<_> = snapshot.inventory.items.iter().filter(|i| i.equipped).collect();
        if equipped.is_empty() {
            lines.push(Line::from(Span::styled(" nothing", Style::default().fg(Color::DarkGray))));
        }
        for item in equipped {
            lines.push(Line::from(format!(" {}", truncate_name(&item.name, width))));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Monsters: {}", snapshot.monsters.len()),
            label,
        )));
        for archetype in [Archetype::Goblin, Archetype::Troll, Archetype::Dragon] {
            let count = snapshot.monsters.iter().filter(|m| m.archetype == archetype).count();
            if count > 0 {
                lines.push(Line::from(Span::styled(
                    format!(" {} {} x{}", archetype.glyph(), archetype.name(), count),
                    Style::default().fg(rgb(archetype.def().fg)),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[hjkl] Move [a] Attack",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "[e] Inventory [q] Quit",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_inventory_overlay(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Inventory ")
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(inner);

        let width = layout[0].width.saturating_sub(6) as usize;
        let lines: Vec<Line> = if snapshot.inventory.items.is_empty() {
            vec![Line::from(Span::styled(
                "Your pack is empty.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            snapshot
                .inventory
                .items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let selected = idx == snapshot.inventory.cursor;
                    let marker = if selected { ">" } else { " " };
                    let equip = if item.equipped { " [E]" } else { "" };
                    let text = format!(
                        "{} {}. {}{}",
                        marker,
                        idx + 1,
                        truncate_name(&item.description, width),
                        equip
                    );
                    let style = if selected {
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                    } else if item.equipped {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(text, style))
                })
                .collect()
        };

        // Keep the cursor on screen
        let visible = layout[0].height as usize;
        let skip = (snapshot.inventory.cursor + 1).saturating_sub(visible);
        let lines: Vec<Line> = lines.into_iter().skip(skip).collect();
        frame.render_widget(Paragraph::new(lines), layout[0]);

        let help = Paragraph::new("[jk] Navigate | [u] Use/Equip | [d] Drop | [Esc] Close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(help, layout[1]);
    }

    fn render_game_over(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let area = frame.area();

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Reached Depth: {}", snapshot.depth)),
            Line::from(format!("Level {} with {} exp", snapshot.player.level, snapshot.player.experience)),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to exit",
                Style::default().fg(Color::Gray),
            )),
        ];

        let para = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(para, area);
    }

    fn render_victory(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let area = frame.area();

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "VICTORY",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("You cleared all {} depths!", snapshot.max_depth)),
            Line::from(format!("Level {} with {} exp", snapshot.player.level, snapshot.player.experience)),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to exit",
                Style::default().fg(Color::Gray),
            )),
        ];

        let para = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(para, area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// First map coordinate shown so the player stays in view
fn camera_origin(player: i32, view: i32, map: i32) -> i32 {
    if map <= view {
        0
    } else {
        (player - view / 2).clamp(0, map - view)
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
