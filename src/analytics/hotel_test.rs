use super::*;
use chrono::{NaiveDate, TimeZone};

fn stay(hotel_id: i64, start: (i32, u32, u32), price: f64, status: BookingStatus) -> HotelBooking {
    HotelBooking {
        hotel_id: Some(hotel_id),
        start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2),
        total_price: Some(price),
        status,
        ..HotelBooking::default()
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).single().unwrap()
}

fn hotels() -> Vec<Hotel> {
    vec![Hotel { id: 1, name: Some("Paws Inn".into()) }]
}

fn bookings() -> Vec<HotelBooking> {
    vec![
        stay(1, (2024, 3, 2), 100.0, BookingStatus::Confirmed),
        stay(2, (2024, 1, 15), 80.0, BookingStatus::Completed),
        stay(1, (2023, 12, 24), 60.0, BookingStatus::Confirmed),
        stay(1, (2024, 3, 10), 40.0, BookingStatus::Pending),
    ]
}

#[test]
fn monthly_buckets_and_totals() {
    let summary = HotelSummary::compute(&bookings(), &hotels(), TimeFrame::Year, now());

    assert_eq!(summary.total_bookings, 4);
    assert!((summary.total_revenue - 280.0).abs() < 1e-9);
    let months: Vec<(&str, u32)> = summary.monthly.iter().map(|m| (m.month.as_str(), m.bookings)).collect();
    assert_eq!(months, [("Mar 2024", 2), ("Jan 2024", 1), ("Dec 2023", 1)]);
    assert!((summary.average_bookings_per_month - 4.0 / 3.0).abs() < 1e-9);
}

#[test]
fn status_counts_in_first_seen_order() {
    let summary = HotelSummary::compute(&bookings(), &hotels(), TimeFrame::Year, now());
    assert_eq!(
        summary.status_counts,
        vec![
            StatusCount { status: BookingStatus::Confirmed, count: 2 },
            StatusCount { status: BookingStatus::Completed, count: 1 },
            StatusCount { status: BookingStatus::Pending, count: 1 },
        ]
    );
}

#[test]
fn year_frame_keeps_current_year_with_name_fallback() {
    let summary = HotelSummary::compute(&bookings(), &hotels(), TimeFrame::Year, now());
    let shares: Vec<(&str, u32, f64)> = summary.hotels.iter().map(|h| (h.name.as_str(), h.bookings, h.revenue)).collect();
    assert_eq!(shares, [("Paws Inn", 2, 140.0), ("Hotel 2", 1, 80.0)]);
}

#[test]
fn month_frame_keeps_current_month_only() {
    let summary = HotelSummary::compute(&bookings(), &hotels(), TimeFrame::Month, now());
    assert_eq!(summary.hotels.len(), 1);
    assert_eq!(summary.hotels[0].bookings, 2);
}

#[test]
fn no_bookings_average_uses_one_month() {
    let summary = HotelSummary::compute(&[], &[], TimeFrame::Year, now());
    assert_eq!(summary.average_bookings_per_month, 0.0);
    assert!(summary.hotels.is_empty());
}

#[test]
fn time_frame_parses() {
    assert_eq!("MONTH".parse::<TimeFrame>().unwrap(), TimeFrame::Month);
    assert!("decade".parse::<TimeFrame>().is_err());
}
