//! Booking receipt rendering.

use std::{fmt::Write as _, io};

use humanize_duration::{Truncate, prelude::DurationExt};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::booking::BookingConfirmation;

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    Io,
}

const DATETIME_FORMAT: &str = "%a, %b %d, %Y at %I:%M %p";

/// Printable receipt for a confirmed booking.
#[derive(Debug, Clone, Copy)]
pub struct BookingReceipt<'a> {
    booking: &'a BookingConfirmation,
}

impl<'a> BookingReceipt<'a> {
    /// Wrap a confirmation for printing.
    #[must_use]
    pub fn new(booking: &'a BookingConfirmation) -> Self {
        BookingReceipt { booking }
    }

    /// Render the receipt as a table.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if the output sink fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let booking = self.booking;
        let cost = &booking.cost;

        let duration = booking
            .pickup
            .duration_until(booking.dropoff)
            .unsigned_abs();

        let mut builder = Builder::default();

        builder.push_record(["Booking Receipt", ""]);
        builder.push_record([
            "Vehicle".to_string(),
            format!("{} ({})", booking.vehicle_name, booking.vehicle_category),
        ]);
        builder.push_record([
            "Pickup".to_string(),
            format!(
                "{} — {}",
                booking.pickup.strftime(DATETIME_FORMAT),
                booking.pickup_location
            ),
        ]);
        builder.push_record([
            "Return".to_string(),
            format!(
                "{} — {}",
                booking.dropoff.strftime(DATETIME_FORMAT),
                booking.dropoff_location
            ),
        ]);
        builder.push_record([
            "Duration".to_string(),
            format!("{}", duration.human(Truncate::Minute)),
        ]);
        let day_word = if cost.days == 1 { "day" } else { "days" };
        builder.push_record([
            format!("Base Rate ({} {day_word} × {})", cost.days, cost.daily_rate),
            format!("{}", cost.base),
        ]);
        builder.push_record(["Tax (10%)".to_string(), format!("{}", cost.tax)]);
        builder.push_record(["Service Fee".to_string(), format!("{}", cost.service_fee)]);
        builder.push_record(["Total".to_string(), format!("{}", cost.total)]);

        // 9 rows total: header, 4 detail rows, 3 cost rows, total.
        let total_row = 8;
        let cost_boundary = 5;

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);
        theme.insert_horizontal_line(cost_boundary, separator);
        theme.insert_horizontal_line(total_row, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Rows::new(total_row..total_row + 1), Color::BOLD);
        table.modify(Columns::new(1..2), Alignment::right());

        let table_str = colorize_borders(&table.to_string());

        writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::Io)
    }
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
