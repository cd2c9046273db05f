//! Replays a canned receiver capture through the framer and prints every
//! GGA fix, the way a logger would poll a live UART.

use nmea_extract::nmea::{GgaFix, NmeaParser};

// As captured from a u-blox module at power-up: a torn sentence, satellite
// chatter, a no-fix GGA, then fixes from two different talkers.
const CAPTURE: &[u8] = b"31.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
    $GPGSV,3,1,11,18,87,050,48,22,56,250,49,21,55,122,49,14,41,056,00*71\r\n\
    $GPGGA,002153.000,,,,,0,00,,,M,,M,,*7D\r\n\
    $GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n\
    $GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
    $GNGGA,165006.000,2241.9107,N,12017.2383,E,1,14,0.79,22.6,M,18.5,M,,*42\r\n";

fn main() {
    let mut parser = NmeaParser::new();
    for &b in CAPTURE {
        let frame = match parser.process_byte(b) {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                eprintln!("frame error: {e}");
                continue;
            }
            None => continue,
        };
        match GgaFix::from_buffer(&frame) {
            Ok(Some(fix)) => {
                let pos = fix.position;
                println!(
                    "{} fix at {:.4}°{} {:.4}°{}, {:.1} m, {} satellites",
                    fix.time,
                    pos.lat.abs(),
                    if pos.lat >= 0.0 { 'N' } else { 'S' },
                    pos.lon.abs(),
                    if pos.lon >= 0.0 { 'E' } else { 'W' },
                    fix.altitude,
                    fix.satellites,
                );
            }
            Ok(None) => println!("Waiting for the position fix..."),
            // other sentence types pass through unremarked
            Err(_) => {}
        }
    }
}
