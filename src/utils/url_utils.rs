// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// URL的授权部分（主机名，带显式端口时附加 `:port`）
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// 校验目标主机配置
///
/// 只接受 `host` 或 `host:port`：不能带协议前缀、路径、查询串或用户信息。
pub fn validate_target_host(target_host: &str) -> Result<(), ParseError> {
    let target_host = target_host.trim().trim_end_matches('/');
    if target_host.is_empty() {
        return Err(ParseError::EmptyHost);
    }
    if target_host.contains("://") {
        return Err(ParseError::InvalidDomainCharacter);
    }
    let url = Url::parse(&format!("http://{}", target_host))?;
    if url.host_str().is_none() {
        return Err(ParseError::EmptyHost);
    }
    if url.path() != "/"
        || url.query().is_some()
        || url.fragment().is_some()
        || !url.username().is_empty()
        || url.password().is_some()
    {
        return Err(ParseError::InvalidDomainCharacter);
    }
    Ok(())
}

/// 将源站URL改写到目标主机
///
/// 保留协议和路径，替换授权部分；查询串与片段不会保留。
/// 源URL无法解析或目标主机无效时返回错误，调用方应将其视为“未找到”。
pub fn rewrite_to_host(source_url: &str, target_host: &str) -> Result<String, ParseError> {
    let source = Url::parse(source_url)?;
    validate_target_host(target_host)?;
    let host = target_host.trim().trim_end_matches('/');
    let mut target = Url::parse(&format!("{}://{}", source.scheme(), host))?;
    target.set_path(source.path());
    Ok(target.to_string())
}
