use retail_app_core::{DisplayFields, DisplayableProduct, Section};
use retail_core::FoundStatus;

const RULE_WIDTH: usize = 40;

fn status_mark(p: &DisplayableProduct) -> &'static str {
    match p.status {
        None => "   ",
        Some(FoundStatus::Unknown) => "[ ]",
        Some(FoundStatus::Found) => "[x]",
        Some(FoundStatus::NotFound) => "[-]",
    }
}

fn push_instructions(out: &mut Vec<String>, fields: &DisplayFields) {
    for (i, text) in fields.instructions.iter().enumerate() {
        let focused = fields.focused_instruction_index == Some(i);
        let marker = if focused { ">" } else { " " };
        out.push(format!("{marker} {}. {text}", i + 1));
    }
}

fn push_products(out: &mut Vec<String>, fields: &DisplayFields) {
    for p in &fields.displayable_products {
        out.push(format!(
            "{} {}  (UPC {}, {})",
            status_mark(p),
            p.product.title,
            p.id(),
            p.product.location
        ));
    }
}

fn push_options(out: &mut Vec<String>, fields: &DisplayFields) {
    for option in &fields.delivery_options {
        let chosen = *option == fields.delivery_preference;
        out.push(format!("({}) {option}", if chosen { "*" } else { " " }));
    }
}

/// Draws the sections the current screen lists, in order, followed by the
/// bottom button when one is offered.
pub fn render_screen(fields: &DisplayFields) -> String {
    let mut out: Vec<String> = Vec::new();

    for section in &fields.sections {
        match section {
            Section::TopSpace | Section::Space => out.push(String::new()),
            Section::CompletedTitle => out.push("ORDER COMPLETED".into()),
            Section::CanceledTitle => out.push("ORDER CANCELED".into()),
            Section::CustomerTitle => out.extend(fields.customer_title.lines().map(String::from)),
            Section::Instructions => push_instructions(&mut out, fields),
            Section::DeliveryOptions => push_options(&mut out, fields),
            Section::Divider => out.push("-".repeat(RULE_WIDTH)),
            Section::Feedback => out.push(fields.feedback.clone()),
            Section::DisplayableProducts => push_products(&mut out, fields),
            Section::CompletedSummary => {
                out.extend(fields.completed_summary.lines().map(String::from))
            }
        }
    }

    if let Some(button) = &fields.bottom_button {
        out.push(String::new());
        if button.enabled {
            out.push(format!("[ {} ]", button.name));
        } else {
            out.push(format!("( {} )", button.name));
        }
    }

    out.join("\n")
}
