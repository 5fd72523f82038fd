//! CSV emission log.
//!
//! An explicitly constructed, explicitly owned sink: the host builds one per
//! service (or shares one deliberately) and passes it in at construction.
//! Buffered writes are flushed on drop, so a finished run always has a
//! complete file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::message::AwarenessMessage;
use crate::time::SimTime;

/// Buffered CSV writer for sent CAMs.
#[derive(Debug)]
pub struct CamLog {
    writer: BufWriter<File>,
}

impl CamLog {
    /// Create (truncating) the log file and write the column header.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(
            writer,
            "Timestamp,ServiceID,Pseudonym,Longitude,Latitude,Width,Length,Speed,Heading"
        )?;
        Ok(Self { writer })
    }

    /// Append one emitted message.
    pub fn log(&mut self, message: &AwarenessMessage, time: SimTime) -> io::Result<()> {
        let pos = &message.basic.reference_position;
        let hf = &message.high_frequency;
        writeln!(
            self.writer,
            "{},{},{},{},{},{},{},{},{}",
            time.as_millis(),
            message.extension.service_id,
            message.station_id,
            pos.longitude.raw(),
            pos.latitude.raw(),
            hf.vehicle_width.raw(),
            hf.vehicle_length.raw(),
            hf.speed.raw(),
            hf.heading.raw(),
        )
    }

    /// Flush buffered rows to disk.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for CamLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam::generate::build_cam;
    use crate::cam::message::StationType;
    use crate::cam::vehicle::VehicleState;

    #[test]
    fn writes_header_and_rows() {
        let dir = std::env::temp_dir();
        let path = dir.join("camlink_test_log.csv");

        let state = VehicleState {
            station_id: 99,
            vehicle_id: "veh1".into(),
            station_type: StationType::PassengerCar,
            latitude: 48.74,
            longitude: 9.32,
            speed: 10.0,
            heading: 45.0,
            acceleration: 0.0,
            yaw_rate: 0.0,
            curvature: 0.0,
            length: 4.5,
            width: 1.8,
            tx_range: 300,
        };
        let cam = build_cam(&state, 0).unwrap();

        {
            let mut log = CamLog::create(&path).unwrap();
            log.log(&cam, SimTime::from_millis(1500)).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("Timestamp,ServiceID"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1500,0,99,"));
        std::fs::remove_file(&path).ok();
    }
}
