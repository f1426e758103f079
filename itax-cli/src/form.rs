//! Raw client input as typed by a user.
//!
//! Every amount is kept as the string the user entered so the form can be
//! filled field by field and validated in one go.

use std::fmt;

use itax_core::{NewClientRecord, TaxpayerInput};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::utils::parse_decimal;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field}: '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field}: amount cannot be negative ({value})")]
    Negative { field: &'static str, value: Decimal },

    #[error("Client name is required to save")]
    MissingName,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub basic_salary: String,
    pub hra_received: String,
    pub rent_paid: String,
    pub other_allowances: String,
    pub capital_gains: String,
    pub other_income: String,
    pub sec80c_investment: String,
    pub sec80ccd_contribution: String,
    pub metro: bool,
}

fn parse_amount(
    field: &'static str,
    value: &str,
) -> Result<Decimal, FormError> {
    let amount = parse_decimal(value).map_err(|_| FormError::InvalidNumber {
        field,
        value: value.trim().to_string(),
    })?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FormError::Negative {
            field,
            value: amount,
        });
    }
    Ok(amount)
}

impl ClientForm {
    pub fn with_name(
        mut self,
        name: &str,
    ) -> Self {
        self.name = name.to_string();
        self
    }

    fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("Basic Salary", self.basic_salary.as_str()),
            ("HRA Received", self.hra_received.as_str()),
            ("Rent Paid", self.rent_paid.as_str()),
            ("Other Allowances", self.other_allowances.as_str()),
            ("Capital Gains", self.capital_gains.as_str()),
            ("Other Income", self.other_income.as_str()),
            ("80C Investment", self.sec80c_investment.as_str()),
            ("80CCD(1B)", self.sec80ccd_contribution.as_str()),
        ]
    }

    /// Parses the amounts into a [`TaxpayerInput`], stopping at the first
    /// bad field.
    pub fn to_input(&self) -> Result<TaxpayerInput, FormError> {
        let [basic, hra, rent, other, capital, other_income, sec80c, sec80ccd] = self.fields();

        Ok(TaxpayerInput {
            basic_salary: parse_amount(basic.0, basic.1)?,
            hra_received: parse_amount(hra.0, hra.1)?,
            rent_paid: parse_amount(rent.0, rent.1)?,
            other_allowances: parse_amount(other.0, other.1)?,
            capital_gains: parse_amount(capital.0, capital.1)?,
            other_income: parse_amount(other_income.0, other_income.1)?,
            sec80c_investment: parse_amount(sec80c.0, sec80c.1)?,
            sec80ccd_contribution: parse_amount(sec80ccd.0, sec80ccd.1)?,
            metro: self.metro,
        })
    }

    /// Like [`to_input`](Self::to_input) but also requires a client name.
    pub fn to_new_client(&self) -> Result<NewClientRecord, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        Ok(NewClientRecord {
            name: name.to_string(),
            input: self.to_input()?,
        })
    }

    /// Checks every amount and reports all problems at once.
    ///
    /// The name is only checked when `require_name` is set, since a
    /// one-off evaluation does not need one.
    pub fn validate_for_submit(
        &self,
        require_name: bool,
    ) -> Result<(), Vec<FormError>> {
        let mut errors = Vec::new();

        if require_name && self.name.trim().is_empty() {
            errors.push(FormError::MissingName);
        }

        for (field, value) in self.fields() {
            if let Err(e) = parse_amount(field, value) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<&TaxpayerInput> for ClientForm {
    fn from(input: &TaxpayerInput) -> Self {
        Self {
            name: String::new(),
            basic_salary: input.basic_salary.to_string(),
            hra_received: input.hra_received.to_string(),
            rent_paid: input.rent_paid.to_string(),
            other_allowances: input.other_allowances.to_string(),
            capital_gains: input.capital_gains.to_string(),
            other_income: input.other_income.to_string(),
            sec80c_investment: input.sec80c_investment.to_string(),
            sec80ccd_contribution: input.sec80ccd_contribution.to_string(),
            metro: input.metro,
        }
    }
}

impl fmt::Display for ClientForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Client Name:      {}", self.name)?;
        for (field, value) in self.fields() {
            writeln!(f, "{:<18}{}", format!("{field}:"), value)?;
        }
        writeln!(f, "Metro City:       {}", if self.metro { "yes" } else { "no" })
    }
}
