//! Queries and parses what the current OpenGL context actually supports.

use std::ffi::CStr;

use gl;
use gl::types::*;

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Version { major, minor }
    }

    /// Parses the leading `major.minor` of a `GL_VERSION` string, e.g.
    /// `"4.6.0 NVIDIA 535.54"`.
    pub fn parse(src: &str) -> Result<Version> {
        let mut iter = src
            .split(move |c: char| !c.is_digit(10))
            .filter(move |v| !v.is_empty())
            .map(move |v| v.parse::<u32>());

        match (iter.next(), iter.next()) {
            (Some(Ok(major)), Some(Ok(minor))) => Ok(Version { major, minor }),
            _ => Err(Error::Device(format!(
                "Unable to parse the OpenGL version from {:?}.",
                src
            ))),
        }
    }
}

#[derive(Debug)]
pub struct Capabilities {
    pub version: Version,
    pub renderer: String,
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse(&get_string(gl::VERSION)?)?;
        let renderer = get_string(gl::RENDERER)?;

        Ok(Capabilities { version, renderer })
    }
}

unsafe fn get_string(name: GLenum) -> Result<String> {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        return Err(Error::Device(
            "The OpenGL context did not report its version.".into(),
        ));
    }

    Ok(CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(Version::parse("4.6.0 NVIDIA 535.54").unwrap(), Version::new(4, 6));
        assert_eq!(Version::parse("4.5").unwrap(), Version::new(4, 5));
        assert!(Version::parse("").is_err());
        assert!(Version::parse("Mesa").is_err());
    }

    #[test]
    fn ordering() {
        assert!(Version::new(4, 5) <= Version::new(4, 6));
        assert!(Version::new(3, 3) < Version::new(4, 0));
        assert!(Version::new(4, 5) > Version::new(4, 4));
    }
}
