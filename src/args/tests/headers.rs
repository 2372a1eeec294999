use super::*;

#[test]
fn parse_header_valid() -> AppResult<()> {
    let parsed = parse_header("Content-Type: application/json");
    match parsed {
        Ok((key, value)) => {
            if key != "Content-Type" {
                return Err(AppError::validation(format!("Unexpected key: {}", key)));
            }
            if value != "application/json" {
                return Err(AppError::validation(format!("Unexpected value: {}", value)));
            }
            Ok(())
        }
        Err(err) => Err(AppError::validation(format!(
            "Expected Ok, got Err: {}",
            err
        ))),
    }
}

#[test]
fn parse_header_keeps_colons_in_value() -> AppResult<()> {
    let (key, value) = parse_header("X-Forwarded: http://a:8080")?;
    if key != "X-Forwarded" || value != "http://a:8080" {
        return Err(AppError::validation(format!(
            "Unexpected header: {}={}",
            key, value
        )));
    }
    Ok(())
}

#[test]
fn parse_header_invalid() -> AppResult<()> {
    let parsed = parse_header("MissingDelimiter");
    if parsed.is_err() {
        Ok(())
    } else {
        Err(AppError::validation("Expected Err for invalid header"))
    }
}

#[test]
fn parse_args_collects_repeated_headers() -> AppResult<()> {
    let args = parse_test_args([
        "loadwrk",
        "-H",
        "X-One: 1",
        "--header",
        "X-Two: 2",
        "http://localhost",
    ])?;
    let expected = vec![
        ("X-One".to_owned(), "1".to_owned()),
        ("X-Two".to_owned(), "2".to_owned()),
    ];
    if args.headers != expected {
        return Err(AppError::validation(format!(
            "Unexpected headers: {:?}",
            args.headers
        )));
    }
    Ok(())
}
