use crate::models::TicketField;

/// Sheets read from an export, in ingestion order. Each name doubles as the
/// category label of its rows.
pub const EXPECTED_SHEETS: [&str; 4] = ["硬件工单", "系统工单", "服务工单", "网络工单"];

/// Source header text to normalized field.
pub const COLUMN_MAP: [(&str, TicketField); 11] = [
    ("工单编号(Ticket NO)", TicketField::TicketNo),
    ("工单状态(Ticket Status)", TicketField::TicketStatus),
    ("工单类型(Ticket Type)", TicketField::TicketType),
    ("ISU项目名称(Project Name)", TicketField::ProjectName),
    ("标题(Title)", TicketField::Title),
    ("工单描述(Description)", TicketField::Description),
    ("处理方法(Resolve Method)", TicketField::ResolveMethod),
    ("事件等级(Level)", TicketField::Level),
    ("响应时长(Response SLA)", TicketField::ResponseSla),
    ("处理时长(Process Duration)", TicketField::ProcessDuration),
    ("完成时长(Complete duration)", TicketField::CompleteDuration),
];

pub fn field_for_header(header: &str) -> Option<TicketField> {
    COLUMN_MAP
        .iter()
        .find(|(source, _)| *source == header)
        .map(|&(_, field)| field)
}
