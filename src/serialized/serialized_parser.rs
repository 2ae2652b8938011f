use std::str::FromStr;

use crate::serialized::{SerializedError, SerializedKey, SerializedValue};

/// Nesting limit for arrays and objects.
pub const MAX_DEPTH: usize = 128;

/// Cursor-based decoder for the legacy value serialization format:
///
/// - `N;` null, `b:1;` bool, `i:42;` int, `d:0.5;` float
/// - `s:5:"hello";` byte string (length in bytes)
/// - `a:2:{i:0;s:1:"a";i:1;s:1:"b";}` ordered array
/// - `O:8:"stdClass":1:{s:3:"foo";i:1;}` object
///
/// References (`r:`/`R:`), custom serialization (`C:`), escaped strings
/// (`S:`) and enums (`E:`) are rejected.
#[derive(Debug)]
pub struct SerializedParser<'a> {
    input: &'a [u8],
    pub position: usize,
    depth: usize,
}

impl<'a> SerializedParser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0, depth: 0 }
    }

    /// Decode a complete payload; trailing bytes are an error.
    pub fn parse(input: &'a [u8]) -> Result<SerializedValue, SerializedError> {
        let mut parser = Self::new(input);
        let value = parser.parse_value()?;
        if !parser.eof() {
            return SerializedError::new("unexpected trailing data", parser.position).err();
        }
        Ok(value)
    }

    pub fn eof(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn current(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    pub fn next(&mut self) {
        self.position += 1;
    }

    fn expect(&mut self, expected: u8) -> Result<(), SerializedError> {
        match self.current() {
            Some(byte) if byte == expected => {
                self.next();
                Ok(())
            }
            Some(byte) => SerializedError::new(
                &format!("expected '{}', found '{}'", expected as char, byte as char),
                self.position,
            ).err(),
            None => SerializedError::new(&format!("expected '{}', found end of input", expected as char), self.position).err(),
        }
    }

    /// Consume bytes up to `delimiter` and the delimiter itself.
    fn read_until(&mut self, delimiter: u8) -> Result<&'a [u8], SerializedError> {
        let input = self.input;
        let pivot = self.position;
        let rest = &input[pivot.min(input.len())..];
        match rest.iter().position(|b| *b == delimiter) {
            Some(offset) => {
                self.position = pivot + offset + 1;
                Ok(&rest[..offset])
            }
            None => SerializedError::new(&format!("missing '{}'", delimiter as char), pivot).err(),
        }
    }

    fn read_number<T: FromStr>(&mut self, delimiter: u8) -> Result<T, SerializedError> {
        let pivot = self.position;
        let raw = self.read_until(delimiter)?;
        std::str::from_utf8(raw)
            .ok()
            .and_then(|text| text.parse::<T>().ok())
            .ok_or_else(|| SerializedError::new("invalid number", pivot))
    }

    fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], SerializedError> {
        let input = self.input;
        let end = self.position.checked_add(length).filter(|end| *end <= input.len());
        match end {
            Some(end) => {
                let bytes = &input[self.position..end];
                self.position = end;
                Ok(bytes)
            }
            None => SerializedError::new("string length exceeds payload", self.position).err(),
        }
    }

    /// `<len>:"<bytes>"` (shared by strings and class names).
    fn read_quoted(&mut self) -> Result<&'a [u8], SerializedError> {
        let length = self.read_number::<usize>(b':')?;
        self.expect(b'"')?;
        let bytes = self.read_bytes(length)?;
        self.expect(b'"')?;
        Ok(bytes)
    }

    pub fn parse_value(&mut self) -> Result<SerializedValue, SerializedError> {
        let pivot = self.position;
        let tag = match self.current() {
            Some(tag) => tag,
            None => return SerializedError::new("unexpected end of input", pivot).err(),
        };
        self.next();

        match tag {
            b'N' => {
                self.expect(b';')?;
                Ok(SerializedValue::Null)
            }
            b'b' => {
                self.expect(b':')?;
                match self.read_number::<u8>(b';')? {
                    0 => Ok(SerializedValue::Bool(false)),
                    1 => Ok(SerializedValue::Bool(true)),
                    _ => SerializedError::new("invalid boolean", pivot).err(),
                }
            }
            b'i' => {
                self.expect(b':')?;
                Ok(SerializedValue::Int(self.read_number::<i64>(b';')?))
            }
            b'd' => {
                self.expect(b':')?;
                self.parse_float()
            }
            b's' => {
                self.expect(b':')?;
                let bytes = self.read_quoted()?;
                self.expect(b';')?;
                Ok(SerializedValue::Str(bytes.to_vec()))
            }
            b'a' => {
                self.expect(b':')?;
                self.enter(pivot)?;
                let entries = self.parse_entries(|parser| parser.parse_key().map(SerializedKey::into_array_key))?;
                self.depth -= 1;
                Ok(SerializedValue::Array(entries))
            }
            b'O' => {
                self.expect(b':')?;
                let class = String::from_utf8_lossy(self.read_quoted()?).into_owned();
                self.expect(b':')?;
                self.enter(pivot)?;
                let properties = self.parse_entries(|parser| match parser.parse_key()? {
                    SerializedKey::Str(name) => Ok(name),
                    SerializedKey::Int(i) => Ok(i.to_string().into_bytes()),
                })?;
                self.depth -= 1;
                Ok(SerializedValue::Object { class, properties })
            }
            b'r' | b'R' => SerializedError::new("references are not supported", pivot).err(),
            b'C' => SerializedError::new("custom serialized objects are not supported", pivot).err(),
            b'E' => SerializedError::new("enums are not supported", pivot).err(),
            b'S' => SerializedError::new("escaped strings are not supported", pivot).err(),
            other => SerializedError::new(&format!("unknown type tag '{}'", other as char), pivot).err(),
        }
    }

    fn parse_float(&mut self) -> Result<SerializedValue, SerializedError> {
        let pivot = self.position;
        let raw = self.read_until(b';')?;
        let value = match raw {
            b"INF" => f64::INFINITY,
            b"-INF" => f64::NEG_INFINITY,
            b"NAN" => f64::NAN,
            _ => std::str::from_utf8(raw)
                .ok()
                .and_then(|text| text.parse::<f64>().ok())
                .ok_or_else(|| SerializedError::new("invalid float", pivot))?,
        };
        Ok(SerializedValue::Float(value))
    }

    fn parse_key(&mut self) -> Result<SerializedKey, SerializedError> {
        let pivot = self.position;
        match self.parse_value()? {
            SerializedValue::Int(i) => Ok(SerializedKey::Int(i)),
            SerializedValue::Str(bytes) => Ok(SerializedKey::Str(bytes)),
            _ => SerializedError::new("array keys must be int or string", pivot).err(),
        }
    }

    /// `<count>:{<key><value>...}`
    fn parse_entries<K>(
        &mut self,
        mut parse_key: impl FnMut(&mut Self) -> Result<K, SerializedError>,
    ) -> Result<Vec<(K, SerializedValue)>, SerializedError> {
        let count = self.read_number::<usize>(b':')?;
        self.expect(b'{')?;

        // every entry takes at least 4 bytes, so cap the preallocation
        let remaining = self.input.len().saturating_sub(self.position);
        let mut entries = Vec::with_capacity(count.min(remaining / 4));
        for _ in 0..count {
            let key = parse_key(self)?;
            let value = self.parse_value()?;
            entries.push((key, value));
        }

        self.expect(b'}')?;
        Ok(entries)
    }

    fn enter(&mut self, pivot: usize) -> Result<(), SerializedError> {
        if self.depth >= MAX_DEPTH {
            return SerializedError::new("maximum nesting depth exceeded", pivot).err();
        }
        self.depth += 1;
        Ok(())
    }
}
