//! Binary records for currencies and amounts.
//!
//! Unit record: code (3 ASCII bytes), numeric code (`i16` BE), decimal
//! places (`i16` BE).
//!
//! Amount record: tag byte, unit record, scale (`i16` BE), unscaled length
//! (`u32` BE), then the unscaled value as two's-complement big-endian bytes.
//! Tags are `B` for [`BigMoney`], `M` for a [`Money`] at its currency scale
//! and `F` for a [`Money`] at a custom scale.
//!
//! Decoding resolves the code against a registry and rejects records whose
//! metadata no longer matches it.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::BigInt;

use super::big_money::BigMoney;
use super::decimal::ExactDecimal;
use super::fixed::Money;
use crate::currency::{CurrencyRegistry, CurrencyUnit};

const TAG_BIG_MONEY: u8 = b'B';
const TAG_MONEY: u8 = b'M';
const TAG_FIXED_MONEY: u8 = b'F';

fn invalid(reason: impl Into<String>) -> MoneyError {
    MoneyError::InvalidatedRecord(reason.into())
}

fn ensure_remaining(buf: &impl Buf, needed: usize) -> MoneyResult<()> {
    if buf.remaining() < needed {
        return Err(invalid(format!(
            "Record truncated: needed {needed} more bytes, found {}",
            buf.remaining()
        )));
    }
    Ok(())
}

fn to_i16(value: i64, what: &str) -> MoneyResult<i16> {
    i16::try_from(value)
        .map_err(|_| MoneyError::InvalidArgument(format!("{what} {value} does not fit a record")))
}

/// Appends the unit record for `currency`.
pub fn encode_currency(currency: &CurrencyUnit, buf: &mut BytesMut) -> MoneyResult<()> {
    buf.put_slice(currency.code().as_bytes());
    buf.put_i16(to_i16(i64::from(currency.numeric_code()), "Numeric code")?);
    buf.put_i16(to_i16(
        i64::from(currency.raw_decimal_places()),
        "Decimal places",
    )?);
    Ok(())
}

/// Reads a unit record and resolves it in `registry`.
///
/// # Errors
///
/// `UnknownCurrency` if the code is not registered, `InvalidatedRecord` if
/// the record is truncated or its numeric code or decimal places differ from
/// the registered currency.
pub fn decode_currency(buf: &mut impl Buf, registry: &CurrencyRegistry) -> MoneyResult<CurrencyUnit> {
    ensure_remaining(&*buf, 7)?;
    let mut code = [0u8; 3];
    buf.copy_to_slice(&mut code);
    let numeric_code = i32::from(buf.get_i16());
    let decimal_places = i32::from(buf.get_i16());

    let code = std::str::from_utf8(&code)
        .map_err(|_| invalid("Currency code is not ASCII"))?;
    let currency = registry.lookup_by_code(code)?;

    if currency.numeric_code() != numeric_code {
        return Err(invalid(format!(
            "{code} numeric code was {numeric_code}, registry has {}",
            currency.numeric_code()
        )));
    }
    if currency.raw_decimal_places() != decimal_places {
        return Err(invalid(format!(
            "{code} decimal places were {decimal_places}, registry has {}",
            currency.raw_decimal_places()
        )));
    }
    Ok(currency)
}

fn encode_amount(tag: u8, money: &BigMoney) -> MoneyResult<Bytes> {
    let unscaled = money.unscaled_amount().to_signed_bytes_be();
    let length = u32::try_from(unscaled.len())
        .map_err(|_| MoneyError::InvalidArgument(format!("{money} is too large to encode")))?;

    let mut buf = BytesMut::with_capacity(1 + 7 + 2 + 4 + unscaled.len());
    buf.put_u8(tag);
    encode_currency(money.currency(), &mut buf)?;
    buf.put_i16(to_i16(i64::from(money.scale()), "Scale")?);
    buf.put_u32(length);
    buf.put_slice(&unscaled);
    Ok(buf.freeze())
}

fn decode_amount(mut buf: &[u8], registry: &CurrencyRegistry) -> MoneyResult<(u8, BigMoney)> {
    ensure_remaining(&buf, 1)?;
    let tag = buf.get_u8();
    if ![TAG_BIG_MONEY, TAG_MONEY, TAG_FIXED_MONEY].contains(&tag) {
        return Err(invalid(format!("Unknown record tag 0x{tag:02x}")));
    }
    let currency = decode_currency(&mut buf, registry)?;

    ensure_remaining(&buf, 6)?;
    let scale = u32::try_from(buf.get_i16())
        .map_err(|_| invalid("Negative scale in record"))?;
    let length = usize::try_from(buf.get_u32()).map_err(|_| invalid("Length out of range"))?;
    ensure_remaining(&buf, length)?;
    if length == 0 {
        return Err(invalid("Empty unscaled value"));
    }
    let unscaled = BigInt::from_signed_bytes_be(&buf[..length]);
    buf.advance(length);
    if buf.has_remaining() {
        return Err(invalid(format!("{} trailing bytes after record", buf.remaining())));
    }

    Ok((tag, BigMoney::of(currency, ExactDecimal::new(unscaled, scale))))
}

impl BigMoney {
    /// Encodes this value as a `B` record.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the scale does not fit in an `i16`.
    pub fn to_bytes(&self) -> MoneyResult<Bytes> {
        encode_amount(TAG_BIG_MONEY, self)
    }

    /// Decodes a `B` record.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` or `InvalidatedRecord`, see [`decode_currency`].
    pub fn from_bytes(bytes: &[u8], registry: &CurrencyRegistry) -> MoneyResult<Self> {
        match decode_amount(bytes, registry)? {
            (TAG_BIG_MONEY, money) => Ok(money),
            (tag, _) => Err(invalid(format!(
                "Expected a BigMoney record, found tag '{}'",
                char::from(tag)
            ))),
        }
    }
}

impl Money {
    /// Encodes this value as an `M` record at the currency scale, or an `F`
    /// record at a custom scale.
    pub fn to_bytes(&self) -> MoneyResult<Bytes> {
        let tag = if self.is_currency_scale() {
            TAG_MONEY
        } else {
            TAG_FIXED_MONEY
        };
        encode_amount(tag, self.as_big_money())
    }

    /// Decodes an `M` or `F` record.
    ///
    /// An `M` record must still be at its currency's scale.
    pub fn from_bytes(bytes: &[u8], registry: &CurrencyRegistry) -> MoneyResult<Self> {
        let (tag, money) = decode_amount(bytes, registry)?;
        match tag {
            TAG_MONEY if !money.is_currency_scale() => Err(invalid(format!(
                "{} is no longer at the currency scale of {}",
                money,
                money.currency().decimal_places()
            ))),
            TAG_MONEY | TAG_FIXED_MONEY => {
                let scale = money.scale();
                Self::of_scale(money.currency().clone(), money.amount(), scale)
            }
            _ => Err(invalid(format!(
                "Expected a Money record, found tag '{}'",
                char::from(tag)
            ))),
        }
    }
}
