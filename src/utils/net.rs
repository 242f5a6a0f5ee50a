use http::Uri;
use std::io::{Error, ErrorKind};

/// Parses an http(s) endpoint such as the object storage url.
pub fn validate_url_target(url: &str) -> Result<Uri, Error> {
  let uri = url
    .parse::<Uri>()
    .map_err(|e| Error::new(ErrorKind::InvalidInput, format!("invalid URL: {}", e)))?;

  match uri.scheme_str() {
    Some("http") | Some("https") => {}
    _ => {
      return Err(Error::new(ErrorKind::InvalidInput, format!("URL must be http(s): {}", url)));
    }
  }

  if uri.host().is_none() {
    return Err(Error::new(ErrorKind::InvalidInput, format!("URL has no host: {}", url)));
  }

  Ok(uri)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_http_endpoints() {
    let uri = validate_url_target("http://localhost:9000").unwrap();
    assert_eq!(uri.port_u16(), Some(9000));
    assert!(validate_url_target("https://s3.amazonaws.com").is_ok());
  }

  #[test]
  fn rejects_other_targets() {
    assert!(validate_url_target("localhost:9000").is_err());
    assert!(validate_url_target("ftp://files.example.com").is_err());
    assert!(validate_url_target("not a url").is_err());
  }
}
