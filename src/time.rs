//! RFC 3339 datetimes with the v0.4.0 defaulting rules: a date with no time
//! part is midnight UTC, and a date-time with no zone is UTC.

#[cfg(test)]
#[path = "./time_tests.rs"]
mod tests;

use std::fmt;

/// A TOML datetime: a single instant in RFC 3339 shape.
///
/// All fields are populated; the parser fills in midnight and a zero offset
/// where the document omits them. `offset_minutes` is the signed offset from
/// UTC, `0` meaning UTC (rendered `Z`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datetime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    pub offset_minutes: i16,
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

fn two_digits(b: &[u8], at: usize) -> Option<u8> {
    match b.get(at..at + 2)? {
        &[d1, d2] if d1.is_ascii_digit() && d2.is_ascii_digit() => {
            Some((d1 - b'0') * 10 + (d2 - b'0'))
        }
        _ => None,
    }
}

fn four_digits(b: &[u8], at: usize) -> Option<u16> {
    let high = two_digits(b, at)?;
    let low = two_digits(b, at + 2)?;
    Some(u16::from(high) * 100 + u16::from(low))
}

impl Datetime {
    /// Parses `YYYY-MM-DD[THH:MM:SS[.fraction][Z|±HH:MM]]`, consuming the
    /// entire input. Field ranges are validated, including day-of-month with
    /// leap years; second 60 is admitted for leap seconds. Fraction digits
    /// beyond nanosecond precision are dropped.
    pub fn parse(s: &str) -> Option<Datetime> {
        let b = s.as_bytes();
        let year = four_digits(b, 0)?;
        if b.get(4) != Some(&b'-') {
            return None;
        }
        let month = two_digits(b, 5)?;
        if b.get(7) != Some(&b'-') {
            return None;
        }
        let day = two_digits(b, 8)?;
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return None;
        }

        let mut datetime = Datetime {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            offset_minutes: 0,
        };
        if b.len() == 10 {
            return Some(datetime);
        }

        if b.get(10) != Some(&b'T') {
            return None;
        }
        datetime.hour = two_digits(b, 11)?;
        if b.get(13) != Some(&b':') {
            return None;
        }
        datetime.minute = two_digits(b, 14)?;
        if b.get(16) != Some(&b':') {
            return None;
        }
        datetime.second = two_digits(b, 17)?;
        if datetime.hour > 23 || datetime.minute > 59 || datetime.second > 60 {
            return None;
        }

        let mut i = 19;
        if b.get(i) == Some(&b'.') {
            i += 1;
            let start = i;
            let mut nanos: u32 = 0;
            let mut digits = 0u32;
            while let Some(d) = b.get(i).copied().filter(|d| d.is_ascii_digit()) {
                if digits < 9 {
                    nanos = nanos * 10 + u32::from(d - b'0');
                    digits += 1;
                }
                i += 1;
            }
            if i == start {
                return None;
            }
            while digits < 9 {
                nanos *= 10;
                digits += 1;
            }
            datetime.nanosecond = nanos;
        }

        match b.get(i) {
            // No zone: UTC.
            None => Some(datetime),
            Some(b'Z') => {
                if i + 1 == b.len() {
                    Some(datetime)
                } else {
                    None
                }
            }
            Some(&(sign @ (b'+' | b'-'))) => {
                let hours = two_digits(b, i + 1)?;
                if b.get(i + 3) != Some(&b':') {
                    return None;
                }
                let minutes = two_digits(b, i + 4)?;
                if i + 6 != b.len() || hours > 23 || minutes > 59 {
                    return None;
                }
                let total = i16::from(hours) * 60 + i16::from(minutes);
                datetime.offset_minutes = if sign == b'-' { -total } else { total };
                Some(datetime)
            }
            Some(_) => None,
        }
    }
}

impl fmt::Display for Datetime {
    /// RFC 3339 with nanosecond precision: the fraction is trimmed of
    /// trailing zeros and omitted when zero; a zero offset renders as `Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.nanosecond != 0 {
            let mut nanos = self.nanosecond;
            let mut width: usize = 9;
            while nanos % 10 == 0 {
                nanos /= 10;
                width -= 1;
            }
            write!(f, ".{nanos:0width$}")?;
        }
        if self.offset_minutes == 0 {
            f.write_str("Z")
        } else {
            let (sign, minutes) = if self.offset_minutes < 0 {
                ('-', -self.offset_minutes)
            } else {
                ('+', self.offset_minutes)
            };
            write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
        }
    }
}

impl fmt::Debug for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Datetime {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ser.collect_str(self)
    }
}
