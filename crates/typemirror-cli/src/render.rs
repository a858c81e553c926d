use colored::Colorize;

use crate::report::{CheckReport, ModuleReport, PropertyReport, TypeReport};

/// Text renderer for reports. Headings are colored only when `color` is set.
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new(color: bool) -> Self {
        TextRenderer { color }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn modules(&self, names: &[&str]) -> String {
        let mut out = self.heading(&format!("Modules ({})", names.len()));
        out.push('\n');
        for name in names {
            out.push_str("  ");
            out.push_str(name);
            out.push('\n');
        }
        out
    }

    pub fn module(&self, report: &ModuleReport) -> String {
        let mut out = self.heading(&format!("module {}", report.name));
        out.push('\n');
        if let Some(original) = &report.original_name {
            out.push_str(&format!("  {} {original}\n", self.label("original name:")));
        }
        if !report.namespaces.is_empty() {
            out.push_str(&format!(
                "  {} {}\n",
                self.label("namespaces:"),
                report.namespaces.join(", ")
            ));
        }
        if report.members.is_empty() {
            out.push_str("  (no members)\n");
        }
        for member in &report.members {
            out.push_str(&format!("  {} {}\n", member.kind.label(), member.name));
        }
        out
    }

    pub fn type_report(&self, report: &TypeReport) -> String {
        let mut title = format!("{} {}", report.kind.label(), report.name);
        if !report.type_parameters.is_empty() {
            title.push_str(&format!("<{}>", report.type_parameters.join(", ")));
        }
        let mut out = self.heading(&title);
        out.push('\n');

        if let Some(comment) = &report.comment {
            for line in comment.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        if !report.extends.is_empty() {
            out.push_str(&format!("  {} {}\n", self.label("extends"), report.extends.join(", ")));
        }
        if !report.implements.is_empty() {
            out.push_str(&format!(
                "  {} {}\n",
                self.label("implements"),
                report.implements.join(", ")
            ));
        }
        if let Some(target) = &report.target {
            out.push_str(&format!("  {} {target}\n", self.label("=")));
        }

        if !report.constructor.is_empty() {
            out.push_str(&format!("  {}\n", self.label("constructor:")));
            for signature in &report.constructor {
                out.push_str(&format!("    new {signature}\n"));
            }
        }
        if !report.properties.is_empty() {
            out.push_str(&format!("  {}\n", self.label("properties:")));
            for property in &report.properties {
                out.push_str(&format!("    {}\n", property_line(property)));
            }
        }
        if !report.methods.is_empty() {
            out.push_str(&format!("  {}\n", self.label("methods:")));
            for method in &report.methods {
                for signature in &method.signatures {
                    out.push_str(&format!("    {}: {signature}\n", method.name));
                }
            }
        }
        if !report.members.is_empty() {
            out.push_str(&format!("  {}\n", self.label("members:")));
            for member in &report.members {
                match &member.value {
                    Some(value) => out.push_str(&format!("    {} = {value}\n", member.name)),
                    None => out.push_str(&format!("    {}\n", member.name)),
                }
            }
        }
        out
    }

    pub fn check(&self, report: &CheckReport) -> String {
        let mut out = String::new();
        match &report.error {
            Some(error) => {
                let label = if self.color {
                    "error".red().bold().to_string()
                } else {
                    "error".to_string()
                };
                out.push_str(&format!("{label}: {}\n", error.message));
            }
            None => {
                let summary = format!(
                    "checked {} declarations ({} mirrors)",
                    report.declarations, report.mirrors
                );
                out.push_str(&if self.color {
                    summary.green().to_string()
                } else {
                    summary
                });
                out.push('\n');
            }
        }

        for mismatch in &report.optionality_mismatches {
            let label = if self.color {
                "warning".yellow().bold().to_string()
            } else {
                "warning".to_string()
            };
            let detail = if mismatch.flagged {
                "flagged optional but its type does not start with `undefined`"
            } else {
                "type starts with `undefined` but it is not flagged optional"
            };
            out.push_str(&format!("{label}: {} {detail}\n", mismatch.path));
        }
        out
    }
}

fn property_line(property: &PropertyReport) -> String {
    let mut line = String::new();
    if property.visibility != typemirror::Visibility::Public {
        line.push_str(property.visibility.as_str());
        line.push(' ');
    }
    if property.is_static {
        line.push_str("static ");
    }
    if property.readonly {
        line.push_str("readonly ");
    }
    line.push_str(&property.name);
    if property.optional {
        line.push('?');
    }
    line.push_str(": ");
    line.push_str(&property.ty);
    if property.inherited {
        line.push_str(" (inherited)");
    }
    line
}
