use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum OutputBlock {
    Title(String),
    /// A room name; lighter than a `Title` banner.
    Heading(String),
    Text(String),
    Event(String),
    Menu(Vec<MenuEntry>),
    Prompt(String),
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Title(s));
        }
    }

    pub fn heading(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Heading(s));
        }
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn event(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Event(s));
        }
    }

    pub fn menu(&mut self, entries: Vec<MenuEntry>) {
        if !entries.is_empty() {
            self.blocks.push(OutputBlock::Menu(entries));
        }
    }

    pub fn set_prompt(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // ensure only one Prompt block exists, always last
        self.blocks.retain(|b| !matches!(b, OutputBlock::Prompt(_)));
        self.blocks.push(OutputBlock::Prompt(s));
    }

    /// Plain-text view of the output, one entry per line, for front ends
    /// that do not format blocks themselves. Tests read output through it too.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                OutputBlock::Title(s)
                | OutputBlock::Text(s)
                | OutputBlock::Event(s)
                | OutputBlock::Prompt(s) => lines.push(s.clone()),
                OutputBlock::Menu(entries) => {
                    for e in entries {
                        lines.push(format!("[{}] {}", e.key, e.label));
                    }
                }
                OutputBlock::Heading(s) => lines.push(format!("--- {} ---", s)),
            }
        }
        lines
    }

    /// True if any line of `lines()` contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}
