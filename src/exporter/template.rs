use crate::error::PipelineError;

/// A fixed document with `{{name}}` slots. Filling is literal substitution: values
/// are inserted as given and never rescanned for slots.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    /// Slot names in order of appearance (repeats included).
    pub fn slots(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.source;
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    names.push(after[..end].trim());
                    rest = &after[end + 2..];
                }
                None => break,
            }
        }
        names
    }

    /// Every slot must be given a value and every value must name a slot.
    pub fn fill(&self, values: &[(&str, &str)]) -> Result<String, PipelineError> {
        let slots = self.slots();
        if let Some((name, _)) = values.iter().find(|(n, _)| !slots.iter().any(|s| s == n)) {
            return Err(PipelineError::Template(format!("unknown slot `{name}`")));
        }

        let mut out = String::with_capacity(self.source.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
        let mut rest = self.source;
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else { break };
            let name = after[..end].trim();
            let value = values
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| PipelineError::Template(format!("unfilled slot `{name}`")))?;
            out.push_str(&rest[..start]);
            out.push_str(value);
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
