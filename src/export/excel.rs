//! Excel export of shipment records

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::Result;
use crate::models::{ShipmentRecord, ShipmentSummary};

const HEADERS: [&str; 16] = [
    "id",
    "source",
    "destination",
    "product_name",
    "date",
    "quantity",
    "weight",
    "driver_name",
    "truck",
    "toll_fees",
    "food_costs",
    "amount_charged",
    "driver_due",
    "owner_due",
    "created_by",
    "created_at",
];

/// Render records into an `.xlsx` workbook held in memory
pub fn records_to_xlsx(records: &[ShipmentRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    write_records_sheet(workbook.add_worksheet(), records)?;
    write_summary_sheet(
        workbook.add_worksheet(),
        &ShipmentSummary::from_records(records),
    )?;

    Ok(workbook.save_to_buffer()?)
}

fn write_records_sheet(sheet: &mut Worksheet, records: &[ShipmentRecord]) -> Result<()> {
    sheet.set_name("Records")?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("0.00");

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;

        sheet.write_number(row, 0, record.id as f64)?;
        sheet.write_string(row, 1, &record.source)?;
        sheet.write_string(row, 2, &record.destination)?;
        sheet.write_string(row, 3, &record.product_name)?;
        sheet.write_string(row, 4, record.date.format("%Y-%m-%d").to_string())?;
        sheet.write_number(row, 5, record.quantity as f64)?;
        sheet.write_number(row, 6, record.weight)?;
        sheet.write_string(row, 7, &record.driver_name)?;
        sheet.write_string(row, 8, &record.truck)?;
        sheet.write_number_with_format(row, 9, record.toll_fees, &money)?;
        sheet.write_number_with_format(row, 10, record.food_costs, &money)?;
        sheet.write_number_with_format(row, 11, record.amount_charged, &money)?;
        sheet.write_number_with_format(row, 12, record.driver_due, &money)?;
        sheet.write_number_with_format(row, 13, record.owner_due, &money)?;
        sheet.write_string(row, 14, &record.created_by)?;
        sheet.write_string(row, 15, record.created_at.to_rfc3339())?;
    }

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, summary: &ShipmentSummary) -> Result<()> {
    sheet.set_name("Summary")?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("0.00");

    sheet.write_string_with_format(0, 0, "Shipment Summary", &header_format)?;

    let totals = [
        ("Records", summary.records as f64),
        ("Total quantity", summary.total_quantity as f64),
        ("Total weight", summary.total_weight),
        ("Amount charged", summary.total_amount_charged),
        ("Toll fees", summary.total_toll_fees),
        ("Food costs", summary.total_food_costs),
        ("Driver due", summary.total_driver_due),
        ("Owner due", summary.total_owner_due),
    ];
    for (idx, (label, value)) in totals.iter().enumerate() {
        let row = (idx + 2) as u32;
        sheet.write_string(row, 0, *label)?;
        sheet.write_number_with_format(row, 1, *value, &money)?;
    }

    let mut row = (totals.len() + 3) as u32;
    for (col, header) in ["Driver", "Trips", "Amount charged", "Driver due"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(row, col as u16, *header, &header_format)?;
    }

    for driver in &summary.drivers {
        row += 1;
        sheet.write_string(row, 0, &driver.driver_name)?;
        sheet.write_number(row, 1, driver.trips as f64)?;
        sheet.write_number_with_format(row, 2, driver.amount_charged, &money)?;
        sheet.write_number_with_format(row, 3, driver.driver_due, &money)?;
    }

    Ok(())
}
