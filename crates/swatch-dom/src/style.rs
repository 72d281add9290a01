//! Inline style (`style` attribute)
//!
//! Just enough of CSSStyleDeclaration to read and write single properties.

/// Parsed `style` attribute declarations, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `prop: value; prop: value`
    pub fn parse(s: &str) -> Self {
        let declarations = s.split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim().to_ascii_lowercase();
                let value = value.trim();
                (!prop.is_empty() && !value.is_empty()).then(|| (prop, value.to_string()))
            })
            .collect();
        Self { declarations }
    }

    /// Get a property value
    pub fn get(&self, prop: &str) -> Option<&str> {
        self.declarations.iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it (like `el.style.display = ''`)
    pub fn set(&mut self, prop: &str, value: &str) {
        let prop = prop.to_ascii_lowercase();
        if value.is_empty() {
            self.declarations.retain(|(p, _)| *p != prop);
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, v)) => *v = value.to_string(),
            None => self.declarations.push((prop, value.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl std::fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (prop, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", prop, value)?;
        }
        Ok(())
    }
}
