//! HTML pages for the practice flow. Every dynamic string goes through
//! `ammonia::clean_text` before it reaches the markup.

use ammonia::clean_text;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 32rem; margin: 3rem auto; text-align: center; }}
.correct {{ color: #1b7f3b; }}
.incorrect {{ color: #b3261e; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = clean_text(title),
        body = body,
    )
}

pub fn home() -> String {
    layout(
        "Math Practice",
        r#"<h1>Math Practice</h1>
<p>Answer a quick addition, subtraction or multiplication question.</p>
<form method="post" action="/start_practice">
<button type="submit">Start practice</button>
</form>"#,
    )
}

pub fn practice(question: &str) -> String {
    layout(
        "Practice",
        &format!(
            r#"<h1>Practice</h1>
<p class="question">{question}</p>
<form method="post" action="/check_answer">
<input type="text" name="answer" autocomplete="off" autofocus>
<button type="submit">Check answer</button>
</form>"#,
            question = clean_text(question),
        ),
    )
}

pub fn results(feedback: &str, correct: bool) -> String {
    let class = if correct { "correct" } else { "incorrect" };
    layout(
        "Results",
        &format!(
            r#"<h1>Results</h1>
<p class="feedback {class}" data-correct="{correct}">{feedback}</p>
<form method="post" action="/start_practice">
<button type="submit">Try another question</button>
</form>
<p><a href="/">Back to home</a></p>"#,
            class = class,
            correct = correct,
            feedback = clean_text(feedback),
        ),
    )
}
