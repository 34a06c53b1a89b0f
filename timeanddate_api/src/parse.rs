//! Maps validated `dstlist` payloads into typed [`DstEntry`] records.

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::types::{Country, DstEntry, Place, TdTimeZone, TimeChange};
use crate::Error;

/// Parses a validated payload into DST records, one per `<dstentry>`
/// element, preserving the order the service sent them in.
///
/// Malformed markup surfaces as [`Error::MalformedResponse`]; a partial
/// list is never returned.
pub(crate) fn parse_dst_list(body: &str) -> Result<Vec<DstEntry>, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut entries = Vec::new();
    let mut saw_dstlist = false;
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"dstlist" => {
                saw_dstlist = true;
            }
            Event::Start(e) if e.local_name().as_ref() == b"dstentry" => {
                entries.push(parse_entry(&mut reader)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !saw_dstlist {
        return Err(Error::MalformedResponse(
            "response contains no <dstlist> element".to_string(),
        ));
    }
    Ok(entries)
}

fn malformed(e: quick_xml::Error) -> Error {
    Error::MalformedResponse(e.to_string())
}

fn parse_entry(reader: &mut Reader<&[u8]>) -> Result<DstEntry, Error> {
    let mut country = None;
    let mut region_description = None;
    let mut biggest_place = None;
    let mut places = Vec::new();
    let mut std_timezone = None;
    let mut dst_timezone = None;
    let mut dst_start = None;
    let mut dst_end = None;
    let mut special = None;
    let mut time_changes = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"region" => parse_region(
                    reader,
                    &mut country,
                    &mut region_description,
                    &mut biggest_place,
                    &mut places,
                )?,
                b"stdtimezone" => {
                    std_timezone = Some(parse_timezone(reader, b"stdtimezone")?);
                }
                b"dsttimezone" => {
                    dst_timezone = Some(parse_timezone(reader, b"dsttimezone")?);
                }
                b"dststart" => {
                    dst_start = Some(parse_instant(read_text(reader, &e)?.trim())?);
                }
                b"dstend" => {
                    dst_end = Some(parse_instant(read_text(reader, &e)?.trim())?);
                }
                b"special" => {
                    special = non_empty(read_text(reader, &e)?.trim());
                }
                b"timechanges" => {
                    time_changes = Some(parse_time_changes(reader)?);
                }
                _ => {
                    reader.read_to_end(e.name()).map_err(malformed)?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"dstentry" => break,
            Event::Eof => {
                return Err(Error::MalformedResponse(
                    "unexpected end of document inside <dstentry>".to_string(),
                ))
            }
            _ => {}
        }
    }

    Ok(DstEntry {
        country: country.ok_or_else(|| {
            Error::MalformedResponse("<dstentry> is missing its <country> element".to_string())
        })?,
        region_description,
        biggest_place,
        std_timezone: std_timezone.ok_or_else(|| {
            Error::MalformedResponse("<dstentry> is missing its <stdtimezone> element".to_string())
        })?,
        dst_timezone,
        dst_start,
        dst_end,
        special,
        places: if places.is_empty() { None } else { Some(places) },
        time_changes,
    })
}

fn parse_region(
    reader: &mut Reader<&[u8]>,
    country: &mut Option<Country>,
    region_description: &mut Option<String>,
    biggest_place: &mut Option<String>,
    places: &mut Vec<Place>,
) -> Result<(), Error> {
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"country" => {
                    let id = attr_string(&e, b"id")?.ok_or_else(|| {
                        Error::MalformedResponse(
                            "<country> is missing its id attribute".to_string(),
                        )
                    })?;
                    let name = read_text(reader, &e)?.trim().to_string();
                    *country = Some(Country { id, name });
                }
                b"desc" => {
                    *region_description = non_empty(read_text(reader, &e)?.trim());
                }
                b"biggestplace" => {
                    *biggest_place = non_empty(read_text(reader, &e)?.trim());
                }
                b"location" => {
                    let id = attr_string(&e, b"id")?
                        .ok_or_else(|| {
                            Error::MalformedResponse(
                                "<location> is missing its id attribute".to_string(),
                            )
                        })?
                        .parse::<i64>()
                        .map_err(|err| {
                            Error::MalformedResponse(format!("invalid location id: {err}"))
                        })?;
                    let state = attr_string(&e, b"state")?;
                    let name = read_text(reader, &e)?.trim().to_string();
                    places.push(Place { id, name, state });
                }
                _ => {
                    reader.read_to_end(e.name()).map_err(malformed)?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"region" => return Ok(()),
            Event::Eof => {
                return Err(Error::MalformedResponse(
                    "unexpected end of document inside <region>".to_string(),
                ))
            }
            _ => {}
        }
    }
}

fn parse_timezone(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<TdTimeZone, Error> {
    let mut abbreviation = None;
    let mut name = None;
    let mut offset_seconds = None;
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"zoneabb" => {
                    abbreviation = Some(read_text(reader, &e)?.trim().to_string());
                }
                b"zonename" => {
                    name = non_empty(read_text(reader, &e)?.trim());
                }
                b"zoneoffset" => {
                    offset_seconds = Some(
                        read_text(reader, &e)?
                            .trim()
                            .parse::<i32>()
                            .map_err(|err| {
                                Error::MalformedResponse(format!("invalid zone offset: {err}"))
                            })?,
                    );
                }
                _ => {
                    reader.read_to_end(e.name()).map_err(malformed)?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == end => break,
            Event::Eof => {
                return Err(Error::MalformedResponse(
                    "unexpected end of document inside a timezone element".to_string(),
                ))
            }
            _ => {}
        }
    }
    Ok(TdTimeZone {
        abbreviation: abbreviation.ok_or_else(|| {
            Error::MalformedResponse("timezone element is missing <zoneabb>".to_string())
        })?,
        name,
        offset_seconds: offset_seconds.ok_or_else(|| {
            Error::MalformedResponse("timezone element is missing <zoneoffset>".to_string())
        })?,
    })
}

fn parse_time_changes(reader: &mut Reader<&[u8]>) -> Result<Vec<TimeChange>, Error> {
    let mut changes = Vec::new();
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Empty(e) if e.local_name().as_ref() == b"change" => {
                changes.push(change_from_attrs(&e)?);
            }
            Event::Start(e) if e.local_name().as_ref() == b"change" => {
                let change = change_from_attrs(&e)?;
                reader.read_to_end(e.name()).map_err(malformed)?;
                changes.push(change);
            }
            Event::Start(e) => {
                reader.read_to_end(e.name()).map_err(malformed)?;
            }
            Event::End(e) if e.local_name().as_ref() == b"timechanges" => break,
            Event::Eof => {
                return Err(Error::MalformedResponse(
                    "unexpected end of document inside <timechanges>".to_string(),
                ))
            }
            _ => {}
        }
    }
    Ok(changes)
}

fn change_from_attrs(e: &BytesStart) -> Result<TimeChange, Error> {
    let utc_time = parse_instant(&attr_string(e, b"utctime")?.ok_or_else(|| {
        Error::MalformedResponse("<change> is missing its utctime attribute".to_string())
    })?)?;
    let old_local_time = attr_string(e, b"oldlocaltime")?
        .map(|s| parse_local(&s))
        .transpose()?;
    let new_local_time = attr_string(e, b"newlocaltime")?
        .map(|s| parse_local(&s))
        .transpose()?;
    let new_offset_seconds = attr_string(e, b"newoffset")?
        .ok_or_else(|| {
            Error::MalformedResponse("<change> is missing its newoffset attribute".to_string())
        })?
        .parse::<i32>()
        .map_err(|err| Error::MalformedResponse(format!("invalid newoffset: {err}")))?;
    Ok(TimeChange {
        utc_time,
        old_local_time,
        new_local_time,
        new_offset_seconds,
    })
}

fn read_text(reader: &mut Reader<&[u8]>, e: &BytesStart) -> Result<String, Error> {
    Ok(reader.read_text(e.name()).map_err(malformed)?.into_owned())
}

fn attr_string(e: &BytesStart, key: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::MalformedResponse(err.to_string()))?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::MalformedResponse(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| Error::MalformedResponse(format!("invalid instant {s:?}: {err}")))
}

fn parse_local(s: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|err| Error::MalformedResponse(format!("invalid local time {s:?}: {err}")))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
