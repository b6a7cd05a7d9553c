use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use sixtrack_core::params::TrackIndex;
use sixtrack_core::view::{MixerSlot, SlotId};
use sixtrack_core::Editor;

use super::SurfacePane;

const HINT_COUNT: usize = 8;

impl SurfacePane {
    pub fn render(&self, area: Rect, buf: &mut Buffer, editor: &Editor) {
        let [header, body, footer, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(area);

        let focused = self.focused(editor);
        let view = editor.view();
        let visible = editor.visible_slots();

        let header_spans = self.spans_for(
            editor,
            visible.iter().filter(|s| matches!(s, SlotId::Header(_))),
            focused,
        );
        let title = if view.is_mixer() {
            " SIXTRACK - MIXER ".to_string()
        } else {
            format!(" SIXTRACK - T{} {} ", view.active_track.number(), view.active_machine.name())
        };
        Paragraph::new(Line::from(header_spans))
            .block(Block::default().borders(Borders::ALL).title(title))
            .render(header, buf);

        if view.is_mixer() {
            self.render_mixer_page(body, buf, editor, focused);
        } else {
            let page_spans = self.spans_for(
                editor,
                visible.iter().filter(|s| matches!(s, SlotId::Page(_))),
                focused,
            );
            let title = if view.lfo_detail { " TRACK / LFO " } else { " TRACK " };
            Paragraph::new(Line::from(page_spans))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(title))
                .render(body, buf);
        }

        let machines = self.spans_for(
            editor,
            visible.iter().filter(|s| matches!(s, SlotId::Machine(_))),
            focused,
        );
        let buttons = self.spans_for(
            editor,
            visible.iter().filter(|s| matches!(s, SlotId::TrackButton(_))),
            focused,
        );
        Paragraph::new(vec![Line::from(machines), Line::from(buttons)])
            .block(Block::default().borders(Borders::ALL).title(" TRACKS "))
            .render(footer, buf);

        let status_line = match &self.status {
            Some(message) => Line::from(Span::styled(message.clone(), Style::default().fg(Color::Yellow))),
            None => Line::from(self.hint_spans()),
        };
        Paragraph::new(status_line).render(status, buf);
    }

    fn render_mixer_page(&self, area: Rect, buf: &mut Buffer, editor: &Editor, focused: Option<SlotId>) {
        let mut lines: Vec<Line> = MixerSlot::ALL
            .iter()
            .map(|m| {
                let slots: Vec<SlotId> = TrackIndex::ALL.iter().map(|t| SlotId::Mixer(*m, *t)).collect();
                Line::from(self.spans_for(editor, slots.iter(), focused))
            })
            .collect();
        let delay = [SlotId::MixDelayTime, SlotId::MixDelaySync];
        lines.push(Line::from(self.spans_for(editor, delay.iter(), focused)));

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" MIXER "))
            .render(area, buf);
    }

    fn spans_for<'a>(
        &self,
        editor: &Editor,
        slots: impl Iterator<Item = &'a SlotId>,
        focused: Option<SlotId>,
    ) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for slot in slots {
            let slot_view = editor.slot_view(*slot);
            if !slot_view.visible {
                continue;
            }
            let text = match slot {
                SlotId::TrackButton(t) if editor.view().is_mixer() => {
                    if editor.is_track_muted(*t) {
                        format!("{} MUTE", slot_view.caption)
                    } else {
                        format!("{} ON", slot_view.caption)
                    }
                }
                SlotId::TrackButton(_) => slot_view.caption.clone(),
                _ => format!("{} {}", slot_view.caption, slot_view.text),
            };

            let mut style = Style::default();
            if slot_view.mirror.is_some() {
                style = style.fg(Color::Cyan);
            }
            if slot_view.highlighted {
                style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            if let SlotId::TrackButton(t) = slot {
                if editor.is_track_muted(*t) {
                    style = style.fg(Color::DarkGray);
                }
            }
            if focused == Some(*slot) {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(format!("[{}]", text), style));
            spans.push(Span::raw(" "));
        }
        spans
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let mut seen = Vec::new();
        let mut spans = Vec::new();
        for binding in self.keymap.bindings() {
            if seen.contains(&binding.action) || seen.len() >= HINT_COUNT {
                continue;
            }
            seen.push(binding.action);
            spans.push(Span::styled(
                format!("{:?} ", binding.pattern),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::raw(format!("{}  ", binding.description)));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sixtrack_core::params::ParamStore;
    use sixtrack_core::{dispatch_action, Action, ViewAction};

    use super::*;
    use crate::ui::Keymap;

    fn screen(pane: &SurfacePane, editor: &Editor) -> String {
        let area = Rect::new(0, 0, 200, 16);
        let mut buf = Buffer::empty(area);
        pane.render(area, &mut buf, editor);
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn track_page_shows_active_track_and_controls() {
        let editor = Editor::new(Arc::new(ParamStore::with_default_layout()), TrackIndex::new_clamped(1));
        let pane = SurfacePane::new(Keymap::new());
        let text = screen(&pane, &editor);
        assert!(text.contains("SIXTRACK - T2 KICK"));
        assert!(text.contains("[DECAY 0]"));
        assert!(!text.contains("MIXER"));
    }

    #[test]
    fn mixer_page_shows_mute_state() {
        let mut editor = Editor::new(Arc::new(ParamStore::with_default_layout()), TrackIndex::default());
        dispatch_action(&Action::View(ViewAction::EnterMixer), &mut editor);
        dispatch_action(&Action::View(ViewAction::TrackButton(0)), &mut editor);
        let pane = SurfacePane::new(Keymap::new());
        let text = screen(&pane, &editor);
        assert!(text.contains("[T1 MUTE]"));
        assert!(text.contains("[T2 ON]"));
        assert!(!text.contains("[DECAY"));
    }

    #[test]
    fn muted_track_button_is_dimmed_on_track_page() {
        let mut editor = Editor::new(Arc::new(ParamStore::with_default_layout()), TrackIndex::default());
        editor.store().set_value_by_name("t3_unmuted", 0);
        editor.pump_notifications();
        let pane = SurfacePane::new(Keymap::new());
        let area = Rect::new(0, 0, 200, 16);
        let mut buf = Buffer::empty(area);
        pane.render(area, &mut buf, &editor);

        let fg_of = |needle: &str| {
            (0..area.height).find_map(|y| {
                let row: String = (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect();
                // Borders are multi-byte, so count chars up to the match.
                row.find(needle)
                    .map(|byte| row[..byte].chars().count() as u16)
                    .map(|x| buf[(x + 1, y)].fg)
            })
        };
        assert_eq!(fg_of("[T3]"), Some(Color::DarkGray));
        assert_ne!(fg_of("[T2]"), Some(Color::DarkGray));
    }

    #[test]
    fn tone_track_shows_fine_tune_label() {
        let mut editor = Editor::new(Arc::new(ParamStore::with_default_layout()), TrackIndex::default());
        editor.store().set_value_by_name("t1_machine", 4);
        editor.store().set_value_by_name("t1_color", 0);
        editor.pump_notifications();
        let text = screen(&SurfacePane::new(Keymap::new()), &editor);
        assert!(text.contains("[COLOR -68]"));
    }
}
