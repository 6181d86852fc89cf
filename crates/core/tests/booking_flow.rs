//! End-to-end booking flow tests over the showroom fixture set.

use jiff::civil::date;
use kerbside::{
    booking::{
        DraftError,
        picker::ScriptedPicker,
        store::{InMemoryBookingStore, StatusFilter},
        wizard::{AcceptAll, BookingWizard, ConfirmPrompt, ConfirmSummary, WizardError, WizardStep},
    },
    fixtures::Fixture,
};
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

struct DeclineAll;

impl ConfirmPrompt for DeclineAll {
    fn confirm(&mut self, _summary: &ConfirmSummary<'_>) -> bool {
        false
    }
}

#[test]
fn two_day_civic_rental_comes_to_114_dollars() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let civic = fixture.vehicle_key("honda-civic")?;
    let (catalog, _, _) = fixture.into_parts();

    let opened_at = date(2025, 9, 5).at(10, 0, 0, 0);
    let mut wizard = BookingWizard::open(civic, opened_at)?;

    let mut picker = ScriptedPicker::new();
    picker.push_date(date(2025, 9, 5));
    picker.push_date(date(2025, 9, 7));

    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Dates);

    wizard.pick_pickup_date(&mut picker, date(2025, 9, 5));
    wizard.pick_return_date(&mut picker);
    wizard.next();

    let quote = wizard.quote(&catalog)?;
    assert_eq!(quote.days, 2);
    assert_eq!(quote.base, Money::from_minor(9000, USD));
    assert_eq!(quote.tax, Money::from_minor(900, USD));
    assert_eq!(quote.service_fee, Money::from_minor(1500, USD));
    assert_eq!(quote.total, Money::from_minor(11400, USD));

    let mut store = InMemoryBookingStore::new();
    let key = wizard
        .confirm(&catalog, &mut store, &mut AcceptAll, opened_at)?
        .ok_or("expected a recorded booking")?;

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(key)?.vehicle_name, "Honda Civic");
    assert_eq!(store.get(key)?.cost.total, Money::from_minor(11400, USD));

    Ok(())
}

#[test]
fn same_day_bmw_rental_bills_one_day() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let bmw = fixture.vehicle_key("bmw-3-series")?;
    let (catalog, _, _) = fixture.into_parts();

    let opened_at = date(2025, 9, 5).at(10, 0, 0, 0);
    let mut wizard = BookingWizard::open(bmw, opened_at)?;

    // Pull the return back to the pickup day; same-instant ranges still
    // bill a single day.
    let mut picker = ScriptedPicker::new();
    picker.push_date(date(2025, 9, 5));
    wizard.pick_return_date(&mut picker);

    let quote = wizard.quote(&catalog)?;
    assert_eq!(quote.days, 1);
    assert_eq!(quote.total, Money::from_minor(11290, USD));

    Ok(())
}

#[test]
fn declining_the_prompt_leaves_the_store_untouched() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let civic = fixture.vehicle_key("honda-civic")?;
    let (catalog, _, _) = fixture.into_parts();

    let opened_at = date(2025, 9, 5).at(10, 0, 0, 0);
    let mut wizard = BookingWizard::open(civic, opened_at)?;
    wizard.next();
    wizard.next();

    let mut store = InMemoryBookingStore::new();
    let result = wizard.confirm(&catalog, &mut store, &mut DeclineAll, opened_at)?;

    assert_eq!(result, None);
    assert!(store.is_empty());
    assert_eq!(wizard.step(), WizardStep::Summary);

    Ok(())
}

#[test]
fn return_selection_below_the_pickup_is_dismissed() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let civic = fixture.vehicle_key("honda-civic")?;
    let (catalog, _, _) = fixture.into_parts();

    let opened_at = date(2025, 9, 5).at(10, 0, 0, 0);
    let mut wizard = BookingWizard::open(civic, opened_at)?;

    // A picker scripted below the minimum is treated as a dismissal, so the
    // draft keeps its default next-day return.
    let mut picker = ScriptedPicker::new();
    picker.push_date(date(2025, 9, 1));
    wizard.pick_return_date(&mut picker);

    assert_eq!(wizard.draft().return_date(), date(2025, 9, 6));

    Ok(())
}

#[test]
fn wizard_steps_saturate_at_both_ends() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let civic = fixture.vehicle_key("honda-civic")?;

    let mut wizard = BookingWizard::open(civic, date(2025, 9, 5).at(10, 0, 0, 0))?;

    wizard.previous();
    assert_eq!(wizard.step(), WizardStep::Details);

    wizard.next();
    wizard.next();
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Summary);

    Ok(())
}

#[test]
fn confirm_is_gated_to_the_summary_step() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let civic = fixture.vehicle_key("honda-civic")?;
    let (catalog, _, _) = fixture.into_parts();

    let opened_at = date(2025, 9, 5).at(10, 0, 0, 0);
    let mut wizard = BookingWizard::open(civic, opened_at)?;
    wizard.next();

    let mut store = InMemoryBookingStore::new();
    let result = wizard.confirm(&catalog, &mut store, &mut AcceptAll, opened_at);

    assert!(matches!(result, Err(WizardError::NotAtSummary)));
    assert!(store.is_empty());

    Ok(())
}

#[test]
fn fixture_bookings_populate_the_tab_filters() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let store = fixture.store();

    assert_eq!(store.len(), 4);
    assert_eq!(store.filtered(StatusFilter::Active).len(), 2);
    assert_eq!(store.filtered(StatusFilter::Completed).len(), 1);
    assert_eq!(store.filtered(StatusFilter::Cancelled).len(), 1);

    // Newest first: the confirmed BMW booking was recorded last.
    let (_, newest) = store.iter().next().ok_or("store should not be empty")?;
    assert_eq!(newest.vehicle_name, "BMW 3 Series");

    Ok(())
}

#[test]
fn wizard_confirmation_appends_to_an_existing_history() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let civic = fixture.vehicle_key("honda-civic")?;
    let (catalog, _, mut store) = fixture.into_parts();

    let opened_at = date(2025, 9, 10).at(10, 0, 0, 0);
    let mut wizard = BookingWizard::open(civic, opened_at)?;
    wizard.next();
    wizard.next();

    let before = store.len();
    wizard.confirm(&catalog, &mut store, &mut AcceptAll, opened_at)?;

    assert_eq!(store.len(), before + 1);

    Ok(())
}

#[test]
fn forced_reversed_draft_surfaces_a_draft_error() -> TestResult {
    let fixture = Fixture::from_set("showroom")?;
    let civic = fixture.vehicle_key("honda-civic")?;
    let (catalog, _, _) = fixture.into_parts();

    let opened_at = date(2025, 9, 5).at(10, 0, 0, 0);
    let mut wizard = BookingWizard::open(civic, opened_at)?;

    // Move the pickup forward past the default return.
    let mut picker = ScriptedPicker::new();
    picker.push_date(date(2025, 9, 20));
    wizard.pick_pickup_date(&mut picker, date(2025, 9, 5));

    wizard.next();
    wizard.next();

    let mut store = InMemoryBookingStore::new();
    let result = wizard.confirm(&catalog, &mut store, &mut AcceptAll, opened_at);

    assert!(matches!(
        result,
        Err(WizardError::Draft(DraftError::ReturnBeforePickup))
    ));
    assert!(store.is_empty());

    Ok(())
}
