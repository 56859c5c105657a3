use crate::models::TicketRecord;

/// Records sent to the remote model, taken from the start of the table.
pub const SAMPLE_SIZE: usize = 10;

const INSTRUCTIONS: &str = "\
You are an expert in support ticket analysis. Below is a sample of support ticket data. \
Each record includes a unique ticket number, title, and description. Your task is to analyze \
the text and correlate the tickets by identifying the main issue types and any mentions of \
specific workstations or robots. Use the ticket numbers to precisely count how many tickets \
are correlated with each other.

Please group the tickets into distinct categories based on these criteria and count the number \
of tickets in each category. Also, provide a brief summary of the key findings and \
recommendations for reducing ticket numbers.

Return your answer as a valid JSON object with the following structure:

{
  \"categories\": {
      \"<Category Name>\": <Count>,
      \"...\": ...
  },
  \"summary\": \"<A short summary of your findings and recommendations>\"
}

Here is the sample data:
";

fn format_ticket(record: &TicketRecord) -> String {
    format!(
        "Ticket Number: {}\nTitle: {}\nDescription: {}",
        record.ticket_no.as_deref().unwrap_or_default(),
        record.title.as_deref().unwrap_or_default(),
        record.description.as_deref().unwrap_or_default(),
    )
}

pub fn build_prompt(records: &[TicketRecord]) -> String {
    let sample = records
        .iter()
        .take(SAMPLE_SIZE)
        .map(format_ticket)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{INSTRUCTIONS}{sample}")
}
