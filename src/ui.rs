//! Interface de terminal do trainer — cartões coloridos e spinner de cozimento.
//!
//! Usa as crates `console` para estilização com cores e `indicatif` para o
//! spinner exibido enquanto o timer de cozimento roda na demonstração.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::notify::{Message, Tone};

// Estilo associado ao tom de um cartão.
fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Brand => Style::new().color256(214).bold(),
        Tone::Success => Style::new().green().bold(),
        Tone::Wait => Style::new().blue().bold(),
    }
}

/// Renderiza uma mensagem como texto para o terminal.
///
/// `audience` descreve onde a mensagem apareceria no chat
/// (por exemplo `#training` ou `DM → rookie`).
pub fn render(audience: &str, message: &Message) -> String {
    let dim = Style::new().dim();
    let mut out = String::new();

    let header = if message.ephemeral {
        format!("{audience} (only you can see this)")
    } else {
        audience.to_string()
    };
    out.push_str(&dim.apply_to(format!("── {header} ──")).to_string());
    out.push('\n');

    if let Some(content) = &message.content {
        out.push_str(content);
        out.push('\n');
    }

    if let Some(card) = &message.notification {
        let style = tone_style(card.tone);
        let bar = style.apply_to("┃");
        out.push_str(&format!("{bar} {}\n", style.apply_to(&card.title)));
        for line in card.description.lines() {
            out.push_str(&format!("{bar} {line}\n"));
        }
        out.push_str(&format!(
            "{bar} {}\n",
            dim.apply_to(format!(
                "{} • {}",
                card.footer,
                card.timestamp.format("%H:%M:%S")
            ))
        ));
    }

    out
}

/// Spinner exibido enquanto o pedido está no forno.
pub struct CookSpinner {
    pb: ProgressBar,
}

impl CookSpinner {
    pub fn start(item: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.yellow} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Cooking {item}..."));
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;

    #[test]
    fn render_includes_mention_and_card() {
        console::set_colors_enabled(false);
        let message = Message::card(Notification::new(
            "✅ Ticket Accepted!",
            "line one\nline two",
            Tone::Success,
        ))
        .with_content("<@coach>");

        let text = render("#training", &message);
        assert!(text.contains("── #training ──"));
        assert!(text.contains("<@coach>"));
        assert!(text.contains("┃ 🍩 Sugar Rush Training: ✅ Ticket Accepted!"));
        assert!(text.contains("┃ line two"));
        assert!(text.contains("Simulation Mode"));
    }

    #[test]
    fn render_marks_ephemeral_replies() {
        console::set_colors_enabled(false);
        let text = render("#training", &Message::ephemeral("nope"));
        assert!(text.contains("only you can see this"));
        assert!(text.contains("nope"));
    }
}
