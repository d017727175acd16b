//! HTML for the review page.
//!
//! Every interaction is a plain form post; the server redirects back to `/`
//! and the page is rebuilt from a fresh [`ReviewView`].

use htmlescape::{encode_attribute, encode_minimal};
use review_core::{
    ReviewView, TreeItem, ViewComment, ViewContent, ViewDiffFile, ViewDiffLine, ViewFile,
    ViewLine,
};

const STYLES: &str = include_str!("../assets/styles.css");
const SCRIPT: &str = include_str!("../assets/review.js");

/// Render the full review page.
pub fn render(view: &ReviewView) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&head(&view.selected_label));
    html.push_str("<body>\n");
    html.push_str(&topbar(view));

    if !view.prompt_html.is_empty() {
        html.push_str(&format!(
            "<section class=\"prompt\">{}</section>\n",
            view.prompt_html
        ));
    }

    html.push_str("<div class=\"layout\">\n");
    html.push_str(&tree(&view.tree));
    html.push_str("<main>\n");
    if let Some(error) = &view.error {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            encode_minimal(error)
        ));
    }
    match &view.content {
        ViewContent::File(file) => html.push_str(&file_content(file, view.selection)),
        ViewContent::Diff(diff) => html.push_str(&diff_content(diff, view.selection)),
    }
    html.push_str("</main>\n</div>\n");
    html.push_str(&format!("<script>{}</script>\n</body>\n</html>\n", SCRIPT));
    html
}

/// Page shown after the review was finished.
pub fn render_finished(comment_count: usize) -> String {
    let mut html = head("Review finished");
    html.push_str(&format!(
        "<body>\n<main class=\"finished\"><h1>Review finished</h1>\
         <p>{} comment(s) submitted. You can close this tab.</p></main>\n</body>\n</html>\n",
        comment_count
    ));
    html
}

fn head(title: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>line-review: {}</title>\n<style>{}</style>\n</head>\n",
        encode_minimal(title),
        STYLES
    )
}

fn post_button(action: &str, label: &str, class: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\"><button class=\"{}\">{}</button></form>",
        action,
        class,
        encode_minimal(label)
    )
}

fn topbar(view: &ReviewView) -> String {
    let markdown_file = matches!(&view.content, ViewContent::File(f) if f.markdown_file);
    let file_toggle = match &view.content {
        ViewContent::File(f) if f.markdown_file && f.markdown_rendered => "Show lines",
        ViewContent::File(f) if f.markdown_file => "Show rendered",
        _ if view.render_file => "Plain text",
        _ => "Highlight code",
    };
    let comment_toggle = if view.render_comments {
        "Raw comments"
    } else {
        "Rendered comments"
    };

    let mut html = String::from("<header class=\"topbar\">\n");
    html.push_str(&format!(
        "<h1 class=\"label\">{}</h1>\n",
        encode_minimal(&view.selected_label)
    ));
    html.push_str(&format!(
        "<span class=\"count\">{} comment(s)</span>\n",
        view.comment_count
    ));
    html.push_str(&post_button(
        "/toggle-file-render",
        file_toggle,
        if markdown_file { "toggle markdown" } else { "toggle" },
    ));
    html.push_str(&post_button("/toggle-comment-render", comment_toggle, "toggle"));
    html.push_str(&post_button("/finish", "Finish review", "primary"));
    html.push_str("\n</header>\n");
    html
}

fn tree(items: &[TreeItem]) -> String {
    let mut html = String::from("<nav class=\"tree\">\n<ul>\n");
    for item in items {
        let indent = format!("padding-left: {}em", item.depth);
        if item.is_dir {
            html.push_str(&format!(
                "<li class=\"dir\" style=\"{}\">{}/</li>\n",
                indent,
                encode_minimal(&item.name)
            ));
        } else {
            html.push_str(&format!(
                "<li class=\"file{}\" style=\"{}\"><form method=\"post\" action=\"/select-file\">\
                 <input type=\"hidden\" name=\"path\" value=\"{}\">\
                 <button class=\"link\">{}</button></form></li>\n",
                if item.selected { " selected" } else { "" },
                indent,
                encode_attribute(&item.path),
                encode_minimal(&item.name)
            ));
        }
    }
    html.push_str("</ul>\n</nav>\n");
    html
}

fn line_button(line: u32) -> String {
    format!(
        "<form method=\"post\" action=\"/select-line\">\
         <input type=\"hidden\" name=\"line\" value=\"{0}\">\
         <input type=\"hidden\" name=\"shift\" value=\"0\">\
         <button class=\"line-select\" title=\"Shift-click to extend\">{0}</button></form>",
        line
    )
}

fn row_class(base: &str, selected: bool, commented: bool) -> String {
    let mut class = base.to_string();
    if selected {
        class.push_str(" selected");
    }
    if commented {
        class.push_str(" commented");
    }
    class
}

fn code_cell(html: &str, text: &str) -> String {
    if html.is_empty() {
        encode_minimal(text)
    } else {
        html.to_string()
    }
}

fn comments_row(comments: &[ViewComment], colspan: usize) -> String {
    let mut html = format!(
        "<tr class=\"comment-row\"><td colspan=\"{}\"></td><td>",
        colspan
    );
    for comment in comments {
        html.push_str(&format!(
            "<div class=\"comment\"><div class=\"meta\">{}</div><div class=\"body\">{}</div></div>",
            lines_label(comment.start_line, comment.end_line),
            comment.rendered
        ));
    }
    html.push_str("</td></tr>\n");
    html
}

fn composer_row(selection: (u32, u32), colspan: usize) -> String {
    format!(
        "<tr class=\"composer\"><td colspan=\"{}\"></td><td>\
         <form method=\"post\" action=\"/comment\">\
         <div class=\"meta\">Comment on {}</div>\
         <textarea name=\"comment\" rows=\"4\" autofocus placeholder=\"Leave a comment (markdown)\"></textarea>\
         <div class=\"actions\"><button class=\"primary\">Add comment</button></div></form>\
         {}</td></tr>\n",
        colspan,
        lines_label(selection.0, selection.1),
        post_button("/cancel", "Cancel", "")
    )
}

fn lines_label(start: u32, end: u32) -> String {
    if start == end {
        format!("line {}", start)
    } else {
        format!("lines {}-{}", start, end)
    }
}

fn file_content(file: &ViewFile, selection: (u32, u32)) -> String {
    if file.markdown_rendered {
        return format!("<article class=\"markdown\">{}</article>\n", file.markdown_html);
    }

    let mut html = String::from("<table class=\"code\">\n");
    let mut previous: Option<u32> = None;
    for line in &file.lines {
        if previous.is_some_and(|p| p + 1 != line.number) {
            html.push_str("<tr class=\"gap\"><td colspan=\"2\">…</td></tr>\n");
        }
        previous = Some(line.number);
        html.push_str(&file_line(line));
        if !line.comments.is_empty() {
            html.push_str(&comments_row(&line.comments, 1));
        }
        if selection.0 > 0 && line.number == selection.1 {
            html.push_str(&composer_row(selection, 1));
        }
    }
    html.push_str("</table>\n");
    html
}

fn file_line(line: &ViewLine) -> String {
    format!(
        "<tr class=\"{}\" id=\"L{}\"><td class=\"num\">{}</td><td class=\"src\"><pre>{}</pre></td></tr>\n",
        row_class("line", line.selected, line.commented),
        line.number,
        line_button(line.number),
        code_cell(&line.html, &line.text)
    )
}

fn diff_content(diff: &ViewDiffFile, selection: (u32, u32)) -> String {
    let mut html = format!(
        "<div class=\"diffstat\"><span class=\"add\">+{}</span> <span class=\"del\">-{}</span></div>\n\
         <table class=\"code diff\">\n",
        diff.additions, diff.deletions
    );
    for hunk in &diff.hunks {
        html.push_str(&format!(
            "<tr class=\"hunk\"><td colspan=\"3\">{}</td></tr>\n",
            encode_minimal(&hunk.header)
        ));
        for line in &hunk.lines {
            html.push_str(&diff_line(line));
            if !line.comments.is_empty() {
                html.push_str(&comments_row(&line.comments, 2));
            }
            if selection.0 > 0 && line.selectable && line.new_line == Some(selection.1) {
                html.push_str(&composer_row(selection, 2));
            }
        }
    }
    html.push_str("</table>\n");
    html
}

fn diff_line(line: &ViewDiffLine) -> String {
    let old = line.old_line.map(|n| n.to_string()).unwrap_or_default();
    let (id, new) = match line.new_line {
        Some(n) if line.selectable => (format!(" id=\"L{}\"", n), line_button(n)),
        Some(n) => (String::new(), n.to_string()),
        None => (String::new(), String::new()),
    };
    format!(
        "<tr class=\"{}\"{}><td class=\"num old\">{}</td><td class=\"num\">{}</td>\
         <td class=\"src\"><pre><span class=\"marker\">{}</span>{}</pre></td></tr>\n",
        row_class(&format!("line {}", line.kind.as_str()), line.selected, line.commented),
        id,
        old,
        new,
        line.kind.prefix(),
        code_cell(&line.html, &line.text)
    )
}
