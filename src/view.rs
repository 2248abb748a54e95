//! Server-rendered HTML for the review UI.

use crate::domain::HeadlineRecord;

/// Escape a value for embedding in HTML text or attributes.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         <hr>\n\
         <p><a href=\"/\">Review</a> | <a href=\"/upload\">Upload CSV</a> | \
         <a href=\"/download_csv\">Download CSV</a></p>\n\
         </body>\n\
         </html>\n"
    )
}

/// The classify form for the next unclassified headline.
pub fn pending_page(record: &HeadlineRecord) -> String {
    let body = format!(
        "<h1>Classify this headline</h1>\n\
         <blockquote>{headline}</blockquote>\n\
         <p>Source: {name} ({identifier})</p>\n\
         <form action=\"/classify\" method=\"post\">\n\
         <input type=\"hidden\" name=\"headline_id\" value=\"{id}\">\n\
         <label for=\"sentiment\">Sentiment</label>\n\
         <select name=\"sentiment\" id=\"sentiment\">\n\
         <option value=\"positive\">positive</option>\n\
         <option value=\"neutral\">neutral</option>\n\
         <option value=\"negative\">negative</option>\n\
         </select>\n\
         <label for=\"category\">Category</label>\n\
         <select name=\"category\" id=\"category\">\n\
         <option value=\"ads\">ads</option>\n\
         <option value=\"lawsuit\">lawsuit</option>\n\
         <option value=\"other\">other</option>\n\
         </select>\n\
         <button type=\"submit\">Classify</button>\n\
         </form>",
        headline = escape(&record.headline),
        name = escape(&record.name),
        identifier = escape(&record.identifier),
        id = record.id,
    );
    page("Classify headline", &body)
}

/// The finished view shown once every record is classified.
pub fn done_page(records: &[HeadlineRecord]) -> String {
    let mut body = String::from("<h1>All headlines have been classified.</h1>\n<ul>\n");
    for record in records {
        body.push_str(&format!(
            "<li>{headline} ({sentiment}/{category})\n\
             <form action=\"/undo/{id}\" method=\"post\" style=\"display:inline\">\n\
             <button type=\"submit\">Undo</button>\n\
             </form></li>\n",
            headline = escape(&record.headline),
            sentiment = escape(record.sentiment.as_deref().unwrap_or("")),
            category = escape(record.category.as_deref().unwrap_or("")),
            id = record.id,
        ));
    }
    body.push_str("</ul>");
    page("All done", &body)
}

/// The CSV upload form.
pub fn upload_page() -> String {
    let body = "<h1>Upload a headline CSV</h1>\n\
         <form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\" accept=\".csv\">\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n\
         <p>Expected columns: id, identifier, headline, name. Fields are split on\n\
         raw commas; write a literal comma as &amp;comma; before uploading.</p>";
    page("Upload CSV", body)
}
