use serde::{Deserialize, Serialize};

/// Normalized ticket fields, in storage column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    TicketNo,
    TicketStatus,
    TicketType,
    ProjectName,
    Title,
    Description,
    ResolveMethod,
    Level,
    ResponseSla,
    ProcessDuration,
    CompleteDuration,
}

impl TicketField {
    pub const ALL: [TicketField; 11] = [
        TicketField::TicketNo,
        TicketField::TicketStatus,
        TicketField::TicketType,
        TicketField::ProjectName,
        TicketField::Title,
        TicketField::Description,
        TicketField::ResolveMethod,
        TicketField::Level,
        TicketField::ResponseSla,
        TicketField::ProcessDuration,
        TicketField::CompleteDuration,
    ];

    pub fn as_column(self) -> &'static str {
        match self {
            TicketField::TicketNo => "ticket_no",
            TicketField::TicketStatus => "ticket_status",
            TicketField::TicketType => "ticket_type",
            TicketField::ProjectName => "project_name",
            TicketField::Title => "title",
            TicketField::Description => "description",
            TicketField::ResolveMethod => "resolve_method",
            TicketField::Level => "level",
            TicketField::ResponseSla => "response_sla",
            TicketField::ProcessDuration => "process_duration",
            TicketField::CompleteDuration => "complete_duration",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub ticket_no: Option<String>,
    pub ticket_status: Option<String>,
    pub ticket_type: Option<String>,
    pub project_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub resolve_method: Option<String>,
    pub level: Option<String>,
    pub response_sla: Option<String>,
    pub process_duration: Option<String>,
    pub complete_duration: Option<String>,
    pub category: String,
}

impl TicketRecord {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: TicketField) -> Option<&str> {
        let value = match field {
            TicketField::TicketNo => &self.ticket_no,
            TicketField::TicketStatus => &self.ticket_status,
            TicketField::TicketType => &self.ticket_type,
            TicketField::ProjectName => &self.project_name,
            TicketField::Title => &self.title,
            TicketField::Description => &self.description,
            TicketField::ResolveMethod => &self.resolve_method,
            TicketField::Level => &self.level,
            TicketField::ResponseSla => &self.response_sla,
            TicketField::ProcessDuration => &self.process_duration,
            TicketField::CompleteDuration => &self.complete_duration,
        };
        value.as_deref()
    }

    pub fn set_field(&mut self, field: TicketField, value: Option<String>) {
        let slot = match field {
            TicketField::TicketNo => &mut self.ticket_no,
            TicketField::TicketStatus => &mut self.ticket_status,
            TicketField::TicketType => &mut self.ticket_type,
            TicketField::ProjectName => &mut self.project_name,
            TicketField::Title => &mut self.title,
            TicketField::Description => &mut self.description,
            TicketField::ResolveMethod => &mut self.resolve_method,
            TicketField::Level => &mut self.level,
            TicketField::ResponseSla => &mut self.response_sla,
            TicketField::ProcessDuration => &mut self.process_duration,
            TicketField::CompleteDuration => &mut self.complete_duration,
        };
        *slot = value;
    }

    /// Title and description joined by a space; missing parts count as empty.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
    }
}
