use glam::Vec3;

/// Debug UI surface that components draw their editable fields into.
pub trait Inspector {
    /// Start a section for one component.
    fn header(&mut self, title: &str);
    /// Draggable three-component field.
    fn drag_float3(&mut self, label: &str, value: &mut Vec3);
    /// Draggable scalar field.
    fn drag_float(&mut self, label: &str, value: &mut f32);
    /// Read-only text.
    fn label(&mut self, text: &str);
}

/// Inspector that renders fields as text lines, for logs and tests.
#[derive(Debug, Default)]
pub struct TextInspector {
    lines: Vec<String>,
}

impl TextInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

impl Inspector for TextInspector {
    fn header(&mut self, title: &str) {
        self.lines.push(format!("[{}]", title));
    }

    fn drag_float3(&mut self, label: &str, value: &mut Vec3) {
        self.lines
            .push(format!("  {}: ({:.2}, {:.2}, {:.2})", label, value.x, value.y, value.z));
    }

    fn drag_float(&mut self, label: &str, value: &mut f32) {
        self.lines.push(format!("  {}: {:.2}", label, value));
    }

    fn label(&mut self, text: &str) {
        self.lines.push(format!("  {}", text));
    }
}
