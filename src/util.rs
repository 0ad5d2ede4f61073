use std::{error::Error, io, time::SystemTime};

use chrono::{DateTime, Local};

pub trait ResultExtToIoError<T> {
    fn to_ioerror(self) -> Result<T, io::Error>;
}

impl<T, E> ResultExtToIoError<T> for Result<T, E>
where
    E: Into<Box<dyn Error + Send + Sync>>,
{
    fn to_ioerror(self) -> Result<T, io::Error> {
        self.map_err(io::Error::other)
    }
}

pub trait SystemTimeExt {
    fn strftime(&self, format: &str) -> String;
}

impl SystemTimeExt for SystemTime {
    fn strftime(&self, format: &str) -> String {
        DateTime::<Local>::from(*self).format(format).to_string()
    }
}

#[cfg(test)]
mod test {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn to_ioerror_keeps_message() {
        let result: Result<(), String> = Err("bad config".to_string());
        let err = result.to_ioerror().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(err.to_string(), "bad config");
    }

    #[test]
    fn strftime_formats_local_time() {
        let time = UNIX_EPOCH + Duration::from_secs(86_400 * 365);
        let formatted = time.strftime("%Y-%m-%d");
        assert_eq!(formatted.len(), 10);
        assert!(formatted.starts_with("197"));
    }
}
