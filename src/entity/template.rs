// src/entity/template.rs
use serde::Serialize;

use super::note::Note;

/// A built-in starting point for a new note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub content: &'static str,
    pub color: &'static str,
}

pub static TEMPLATES: [Template; 5] = [
    Template {
        id: "todo",
        name: "To-Do List",
        color: "#C8E6C9",
        content: "📋 To-Do List\n\n✅ Task 1\n□ Task 2\n□ Task 3\n\n📅 Due: \n\n💡 Notes:",
    },
    Template {
        id: "meeting",
        name: "Meeting Notes",
        color: "#BBDEFB",
        content: "📋 Meeting Notes\n\n📅 Date: \n⏰ Time: \n📍 Location: \n\n👥 Attendees:\n• \n• \n• \n\n📝 Agenda:\n• \n• \n• \n\n✅ Action Items:\n• \n• \n•",
    },
    Template {
        id: "code",
        name: "Code Snippet",
        color: "#E1BEE7",
        content: "💻 Code Snippet\n\n📁 File: \n🔧 Language: \n\n📝 Description:\n\n```\n// Your code here\n```\n\n💡 Notes:",
    },
    Template {
        id: "shopping",
        name: "Shopping List",
        color: "#FFCDD2",
        content: "🛒 Shopping List\n\n🏪 Store: \n\n📋 Items:\n□ \n□ \n□ \n□ \n\n💰 Budget: \n\n📅 Date:",
    },
    Template {
        id: "ideas",
        name: "Ideas & Brainstorming",
        color: "#FFF9C4",
        content: "💡 Ideas & Brainstorming\n\n🎯 Topic: \n\n💭 Ideas:\n• \n• \n• \n\n🔍 Research:\n• \n• \n\n✅ Next Steps:\n• \n•",
    },
];

impl Template {
    pub fn all() -> &'static [Template] {
        &TEMPLATES
    }

    pub fn get(id: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id))
    }

    /// Build an unsaved note pre-filled from this template.
    pub fn instantiate(&self) -> Note {
        let mut note = Note::new(self.content);
        note.color = self.color.to_string();
        note
    }
}
