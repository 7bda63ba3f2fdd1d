//! Minimal blocking HTTP/1.1 client for `http://` URLs.

use super::HttpReply;
use anyhow::{Context, Result, anyhow, bail};
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

#[derive(Debug, PartialEq, Eq)]
struct Target {
    authority: String,
    host: String,
    port: u16,
    path: String,
}

fn parse_url(url: &str) -> Result<Target> {
    let rest = url
        .strip_prefix("http://")
        .ok_or_else(|| anyhow!("Only http:// URLs are supported by the built-in client: {url}"))?;

    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    if authority.is_empty() {
        bail!("Missing host in URL: {url}");
    }

    let parse_port = |port: &str| {
        port.parse::<u16>()
            .with_context(|| format!("Invalid port in URL: {url}"))
    };

    // IPv6 literals carry their own colons, so the port only follows the closing bracket
    let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
        let (host, after) = bracketed
            .split_once(']')
            .ok_or_else(|| anyhow!("Unterminated IPv6 address in URL: {url}"))?;
        let port = match after {
            "" => 80,
            _ => match after.strip_prefix(':') {
                Some(port) => parse_port(port)?,
                None => bail!("Unexpected characters after IPv6 address in URL: {url}"),
            },
        };
        (host, port)
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, parse_port(port)?),
            None => (authority, 80),
        }
    };
    if host.is_empty() {
        bail!("Missing host in URL: {url}");
    }

    Ok(Target {
        authority: authority.to_string(),
        host: host.to_string(),
        port,
        path: path.to_string(),
    })
}

pub(crate) fn post_json(url: &str, body: &str, timeout: Duration) -> Result<HttpReply> {
    let target = parse_url(url)?;
    let mut stream = connect(&target, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    let head = format!(
        "POST {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        target.path,
        target.authority,
        body.len()
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(body.as_bytes())?;
    stream.flush()?;

    let mut raw = Vec::new();
    stream
        .read_to_end(&mut raw)
        .with_context(|| format!("Failed to read response from {}", target.authority))?;

    parse_response(&raw)
}

fn connect(target: &Target, timeout: Duration) -> Result<TcpStream> {
    let addrs = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .with_context(|| format!("Failed to resolve {}", target.host))?;

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }

    Err(match last_error {
        Some(e) => anyhow::Error::new(e).context(format!("Failed to connect to {}", target.authority)),
        None => anyhow!("No addresses found for {}", target.host),
    })
}

fn parse_response(raw: &[u8]) -> Result<HttpReply> {
    let split = find(raw, b"\r\n\r\n")
        .ok_or_else(|| anyhow!("Malformed HTTP response: missing header terminator"))?;
    let head = std::str::from_utf8(&raw[..split]).context("Response headers are not UTF-8")?;
    let payload = &raw[split + 4..];

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| anyhow!("Malformed status line: {status_line}"))?;

    let mut chunked = false;
    let mut content_length = None;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.eq_ignore_ascii_case("transfer-encoding") {
            chunked = value.trim().eq_ignore_ascii_case("chunked");
        } else if name.eq_ignore_ascii_case("content-length") {
            content_length = value.trim().parse::<usize>().ok();
        }
    }

    let body = if chunked {
        decode_chunked(payload)?
    } else {
        match content_length {
            Some(len) if len > payload.len() => bail!(
                "Truncated response body: expected {len} bytes, received {}",
                payload.len()
            ),
            Some(len) => payload[..len].to_vec(),
            None => payload.to_vec(),
        }
    };

    Ok(HttpReply {
        status,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn decode_chunked(mut data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        let line_end = find(data, b"\r\n").ok_or_else(|| anyhow!("Truncated chunked body"))?;
        let size_line = std::str::from_utf8(&data[..line_end]).context("Invalid chunk header")?;
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16)
            .with_context(|| format!("Invalid chunk size: {size_hex}"))?;
        data = &data[line_end + 2..];

        if size == 0 {
            return Ok(out);
        }
        if data.len() < size {
            bail!("Truncated chunked body");
        }
        out.extend_from_slice(&data[..size]);
        data = data.get(size + 2..).unwrap_or_default();
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
