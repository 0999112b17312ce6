//! Quote markup builder
//!
//! Pure data-to-markup conversion: no graphics dependency, fully testable.
//! The layout is fixed at [`crate::SURFACE_WIDTH_PT`] logical points wide
//! with automatic height, so the capture is one tall surface that the
//! exporter slices into pages afterwards.

use quote_model::{CompanyInfo, Quote};

const ACCENT: &str = "#202845";
const MUTED: &str = "#666666";

/// Terms printed at the bottom of every quote
pub const TERMS: &[&str] = &[
    "This quote is valid for 30 days from the date of issue.",
    "All prices are subject to site survey and may vary based on actual requirements.",
    "Payment terms: 30% deposit required to secure booking, balance on completion.",
    "All work is fully insured and guaranteed.",
    "Materials and skip hire (where applicable) are additional unless stated.",
    "We reserve the right to adjust prices if project scope changes.",
];

/// Build the Typst source for a quote.
///
/// The notes section is omitted entirely when `quote.notes` is empty, so the
/// terms block follows the totals directly.
pub fn quote_markup(quote: &Quote, company: &CompanyInfo) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str(&format!(
        "#set page(width: {}pt, height: auto, margin: 40pt, fill: white)\n",
        crate::SURFACE_WIDTH_PT
    ));
    out.push_str("#set text(size: 11pt, fill: black)\n");
    out.push_str(&format!(
        "#let muted(body) = text(fill: rgb(\"{MUTED}\"), body)\n\n"
    ));

    header(&mut out, quote, company);
    bill_to(&mut out, quote);
    items_table(&mut out, quote);
    totals(&mut out, quote);

    if !quote.notes.is_empty() {
        notes(&mut out, quote);
    }

    terms(&mut out);
    footer(&mut out, company);

    out
}

fn header(out: &mut String, quote: &Quote, company: &CompanyInfo) {
    out.push_str("#grid(\n  columns: (1fr, auto),\n  [\n");
    out.push_str(&format!(
        "    #text(size: 24pt, weight: \"bold\", fill: rgb(\"{ACCENT}\"))[{}]\n\n",
        esc(&company.name)
    ));
    for line in [
        company.tagline.as_str(),
        company.address.as_str(),
        company.country.as_str(),
    ] {
        out.push_str(&format!("    #muted[{}]\n\n", esc(line)));
    }
    out.push_str(&format!("    #muted[Phone: {}]\n\n", esc(&company.phone)));
    out.push_str(&format!("    #muted[Email: {}]\n", esc(&company.email)));
    out.push_str("  ],\n  align(right)[\n");
    out.push_str(&format!(
        "    #text(size: 20pt, weight: \"bold\", fill: rgb(\"{ACCENT}\"))[QUOTE]\n\n"
    ));
    out.push_str(&format!(
        "    #muted[Quote \\#: {}]\n\n",
        esc(&quote.quote_number)
    ));
    out.push_str(&format!(
        "    #muted[Date: {}]\n\n",
        quote.date.format("%d/%m/%Y")
    ));
    out.push_str(&format!(
        "    #muted[Valid Until: {}]\n",
        quote.valid_until.format("%d/%m/%Y")
    ));
    out.push_str("  ],\n)\n");
    out.push_str(&format!(
        "#line(length: 100%, stroke: 2pt + rgb(\"{ACCENT}\"))\n\n"
    ));
}

fn bill_to(out: &mut String, quote: &Quote) {
    out.push_str(&format!(
        "#text(size: 14pt, weight: \"bold\", fill: rgb(\"{ACCENT}\"))[Bill To:]\n\n"
    ));
    out.push_str(&format!("*{}*\n\n", esc(&quote.customer.name)));
    for line in [
        quote.customer.address.as_str(),
        quote.customer.postcode.as_str(),
        quote.customer.phone.as_str(),
        quote.customer.email.as_str(),
    ] {
        if !line.is_empty() {
            out.push_str(&format!("{}\n\n", esc(line)));
        }
    }
}

fn items_table(out: &mut String, quote: &Quote) {
    out.push_str("#table(\n");
    out.push_str("  columns: (1fr, auto, auto, auto),\n");
    out.push_str("  inset: 10pt,\n");
    out.push_str("  stroke: 0.5pt + rgb(\"#dddddd\"),\n");
    out.push_str(&format!(
        "  fill: (_, y) => if y == 0 {{ rgb(\"{ACCENT}\") }} else if calc.odd(y) {{ rgb(\"#f9f9f9\") }},\n"
    ));
    for heading in ["Description", "Quantity", "Unit Price", "Total"] {
        out.push_str(&format!(
            "  text(fill: white, weight: \"bold\")[{heading}],\n"
        ));
    }
    for item in &quote.items {
        out.push_str(&format!(
            "  [*{}* \\ #text(size: 9pt, fill: rgb(\"{MUTED}\"))[{}]],\n",
            esc(&item.name),
            esc(&item.description)
        ));
        out.push_str(&format!("  align(center)[{}],\n", item.quantity));
        out.push_str(&format!(
            "  align(right)[{}],\n",
            money(item.unit_price)
        ));
        out.push_str(&format!("  align(right)[*{}*],\n", money(item.total)));
    }
    out.push_str(")\n\n");
}

fn totals(out: &mut String, quote: &Quote) {
    let totals = quote.totals();

    out.push_str("#align(right)[#block(width: 300pt)[\n");
    out.push_str("  #grid(columns: (1fr, auto), row-gutter: 10pt,\n");
    out.push_str(&format!(
        "    muted[Subtotal:], [*{}*],\n",
        money(totals.subtotal)
    ));
    if quote.discount > 0.0 {
        let label = match quote.discount_type {
            quote_model::DiscountKind::Percentage => format!("{}%", quote.discount),
            quote_model::DiscountKind::Fixed => money(quote.discount),
        };
        out.push_str(&format!(
            "    muted[Discount ({label}):], text(fill: rgb(\"#d32f2f\"), weight: \"bold\")[-{}],\n",
            money(totals.discount_amount)
        ));
    }
    out.push_str("  )\n");
    out.push_str("  #line(length: 100%, stroke: 2pt + black)\n");
    out.push_str("  #grid(columns: (1fr, auto),\n");
    out.push_str("    text(size: 16pt, weight: \"bold\")[Total:],\n");
    out.push_str(&format!(
        "    text(size: 16pt, weight: \"bold\", fill: rgb(\"{ACCENT}\"))[{}],\n",
        money(totals.total)
    ));
    out.push_str("  )\n");
    out.push_str("]]\n\n");
}

fn notes(out: &mut String, quote: &Quote) {
    out.push_str(&format!(
        "#text(size: 14pt, weight: \"bold\", fill: rgb(\"{ACCENT}\"))[Notes:]\n\n"
    ));
    out.push_str(&format!("{}\n\n", esc(&quote.notes)));
}

fn terms(out: &mut String) {
    out.push_str("#line(length: 100%, stroke: 2pt + rgb(\"#dddddd\"))\n\n");
    out.push_str(&format!(
        "#text(size: 14pt, weight: \"bold\", fill: rgb(\"{ACCENT}\"))[Terms & Conditions:]\n\n"
    ));
    for term in TERMS {
        out.push_str(&format!("- #muted[{}]\n", esc(term)));
    }
    out.push('\n');
}

fn footer(out: &mut String, company: &CompanyInfo) {
    out.push_str("#line(length: 100%, stroke: 1pt + rgb(\"#dddddd\"))\n");
    out.push_str("#align(center)[\n");
    out.push_str(&format!(
        "  #muted[Thank you for considering {} for your project.]\n\n",
        esc(&company.name)
    ));
    out.push_str(&format!(
        "  #muted[For any questions, please contact us at {} or {}]\n",
        esc(&company.phone),
        esc(&company.email)
    ));
    out.push_str("]\n");
}

fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-£{:.2}", amount.abs())
    } else {
        format!("£{amount:.2}")
    }
}

/// Escape characters with markup meaning in Typst content.
fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '#' | '$' | '[' | ']' | '*' | '_' | '`' | '@' | '<' | '>' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
