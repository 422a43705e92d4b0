//! Static lookup tables referenced by name from the PGN catalogue.
//!
//! Four categories exist, mirroring the catalogue sources: flat pair tables,
//! indirect (two-key) tables, bit tables whose keys are bit positions, and
//! field-type tables that select the type of a chained key/value field.
//! Bootstrap resolves every reference; an unknown table name aborts start-up.
use crate::core::{FieldKind, FieldTypeLookupTable, IndirectLookupTable, LookupTable};

//==================================================================================PAIR_TABLES

/// Manufacturer codes registered with the NMEA. Subset of the full registry,
/// covering the manufacturers the catalogue references.
pub static MANUFACTURER_CODE: LookupTable = LookupTable {
    name: "MANUFACTURER_CODE",
    entries: &[
        (78, "FW Murphy"),
        (88, "Kohler"),
        (116, "BEP"),
        (135, "Airmar"),
        (137, "Maretron"),
        (140, "Lowrance"),
        (144, "Mercury"),
        (174, "Volvo Penta"),
        (192, "Floscan"),
        (229, "Garmin"),
        (304, "EMMI Network"),
        (358, "Victron Energy"),
        (378, "Xantrex"),
        (381, "Yanmar"),
        (384, "VDO"),
        (419, "Fusion Electronics"),
        (437, "Digital Yacht"),
        (467, "Hemisphere GPS"),
        (502, "KVH"),
        (717, "Yacht Devices"),
        (1850, "Teleflex"),
        (1851, "Raymarine"),
        (1852, "Navico"),
        (1853, "B&G"),
        (1854, "Mastervolt"),
        (1855, "Furuno"),
        (1856, "Trimble"),
        (1857, "Simrad"),
        (1858, "Litton"),
        (1860, "MMP"),
        (1861, "Vector Cantech"),
    ],
};

/// SAE J1939 industry groups.
pub static INDUSTRY_CODE: LookupTable = LookupTable {
    name: "INDUSTRY_CODE",
    entries: &[
        (0, "Global"),
        (1, "Highway"),
        (2, "Agriculture"),
        (3, "Construction"),
        (4, "Marine Industry"),
        (5, "Industrial"),
    ],
};

/// NMEA 2000 device classes (ISO Address Claim).
pub static DEVICE_CLASS: LookupTable = LookupTable {
    name: "DEVICE_CLASS",
    entries: &[
        (0, "Reserved for 2000 Use"),
        (10, "System tools"),
        (20, "Safety systems"),
        (25, "Internetwork device"),
        (30, "Electrical Distribution"),
        (35, "Electrical Generation"),
        (40, "Steering and Control surfaces"),
        (50, "Propulsion"),
        (60, "Navigation"),
        (70, "Communication"),
        (75, "Sensor Communication Interface"),
        (80, "Instrumentation/general systems"),
        (85, "External Environment"),
        (90, "Internal Environment"),
        (100, "Deck + cargo + fishing equipment systems"),
        (110, "Human Interface"),
        (120, "Display"),
        (125, "Entertainment"),
    ],
};

/// Time sources reported by PGN 126992.
pub static TIME_SOURCE: LookupTable = LookupTable {
    name: "TIME_SOURCE",
    entries: &[
        (0, "GPS"),
        (1, "GLONASS"),
        (2, "Radio Station"),
        (3, "Local Cesium clock"),
        (4, "Local Rubidium clock"),
        (5, "Local Crystal clock"),
    ],
};

/// Heading/course reference frames.
pub static DIRECTION_REFERENCE: LookupTable = LookupTable {
    name: "DIRECTION_REFERENCE",
    entries: &[(0, "True"), (1, "Magnetic"), (2, "Error"), (3, "Null")],
};

/// Wind measurement references.
pub static WIND_REFERENCE: LookupTable = LookupTable {
    name: "WIND_REFERENCE",
    entries: &[
        (0, "True (ground referenced to North)"),
        (1, "Magnetic (ground referenced to Magnetic North)"),
        (2, "Apparent"),
        (3, "True (boat referenced)"),
        (4, "True (water referenced)"),
    ],
};

/// Temperature measurement sources.
pub static TEMPERATURE_SOURCE: LookupTable = LookupTable {
    name: "TEMPERATURE_SOURCE",
    entries: &[
        (0, "Sea Temperature"),
        (1, "Outside Temperature"),
        (2, "Inside Temperature"),
        (3, "Engine Room Temperature"),
        (4, "Main Cabin Temperature"),
        (5, "Live Well Temperature"),
        (6, "Bait Well Temperature"),
        (7, "Refrigeration Temperature"),
        (8, "Heating System Temperature"),
        (9, "Dew Point Temperature"),
        (10, "Apparent Wind Chill Temperature"),
        (11, "Theoretical Wind Chill Temperature"),
        (12, "Heat Index Temperature"),
        (13, "Freezer Temperature"),
        (14, "Exhaust Gas Temperature"),
        (15, "Shaft Seal Temperature"),
    ],
};

/// GNSS constellation types.
pub static GNS: LookupTable = LookupTable {
    name: "GNS",
    entries: &[
        (0, "GPS"),
        (1, "GLONASS"),
        (2, "GPS+GLONASS"),
        (3, "GPS+SBAS/WAAS"),
        (4, "GPS+SBAS/WAAS+GLONASS"),
        (5, "Chayka"),
        (6, "integrated"),
        (7, "surveyed"),
        (8, "Galileo"),
    ],
};

/// GNSS fix methods.
pub static GNS_METHOD: LookupTable = LookupTable {
    name: "GNS_METHOD",
    entries: &[
        (0, "no GNSS"),
        (1, "GNSS fix"),
        (2, "DGNSS fix"),
        (3, "Precise GNSS"),
        (4, "RTK Fixed Integer"),
        (5, "RTK float"),
        (6, "Estimated (DR) mode"),
        (7, "Manual Input"),
        (8, "Simulate mode"),
    ],
};

/// GNSS integrity checking states.
pub static GNS_INTEGRITY: LookupTable = LookupTable {
    name: "GNS_INTEGRITY",
    entries: &[(0, "No integrity checking"), (1, "Safe"), (2, "Caution")],
};

/// GNSS range residual interpretation.
pub static RANGE_RESIDUAL_MODE: LookupTable = LookupTable {
    name: "RANGE_RESIDUAL_MODE",
    entries: &[
        (0, "Range residuals were used to calculate data"),
        (1, "Range residuals were calculated after the position"),
    ],
};

/// Satellite usage status in PGN 129540.
pub static SATELLITE_STATUS: LookupTable = LookupTable {
    name: "SATELLITE_STATUS",
    entries: &[
        (0, "Not tracked"),
        (1, "Tracked"),
        (2, "Used"),
        (3, "Not tracked+Diff"),
        (4, "Tracked+Diff"),
        (5, "Used+Diff"),
    ],
};

/// Generic two-state flag.
pub static YES_NO: LookupTable = LookupTable {
    name: "YES_NO",
    entries: &[(0, "No"), (1, "Yes")],
};

/// ISO Acknowledgement control byte.
pub static ISO_CONTROL: LookupTable = LookupTable {
    name: "ISO_CONTROL",
    entries: &[
        (0, "ACK"),
        (1, "NAK"),
        (2, "Access Denied"),
        (3, "Address Busy"),
    ],
};

/// Group-function codes carried by PGN 126208.
pub static GROUP_FUNCTION: LookupTable = LookupTable {
    name: "GROUP_FUNCTION",
    entries: &[
        (0, "Request"),
        (1, "Command"),
        (2, "Acknowledge"),
        (3, "Read Fields"),
        (4, "Read Fields Reply"),
        (5, "Write Fields"),
        (6, "Write Fields Reply"),
    ],
};

/// Transmit/receive selector in PGN 126464.
pub static PGN_LIST_FUNCTION: LookupTable = LookupTable {
    name: "PGN_LIST_FUNCTION",
    entries: &[
        (0, "Transmit PGN list"),
        (1, "Receive PGN list"),
    ],
};

/// AIS VHF message identifiers (position-report subset).
pub static AIS_MESSAGE_ID: LookupTable = LookupTable {
    name: "AIS_MESSAGE_ID",
    entries: &[
        (1, "Scheduled Class A position report"),
        (2, "Assigned scheduled Class A position report"),
        (3, "Interrogated Class A position report"),
    ],
};

/// AIS repeat indicator.
pub static REPEAT_INDICATOR: LookupTable = LookupTable {
    name: "REPEAT_INDICATOR",
    entries: &[
        (0, "Initial"),
        (1, "First retransmission"),
        (2, "Second retransmission"),
        (3, "Final retransmission"),
    ],
};

/// AIS position accuracy flag.
pub static POSITION_ACCURACY: LookupTable = LookupTable {
    name: "POSITION_ACCURACY",
    entries: &[(0, "Low"), (1, "High")],
};

/// AIS RAIM flag.
pub static RAIM_FLAG: LookupTable = LookupTable {
    name: "RAIM_FLAG",
    entries: &[(0, "not in use"), (1, "in use")],
};

/// AIS transceiver channel information.
pub static AIS_TRANSCEIVER: LookupTable = LookupTable {
    name: "AIS_TRANSCEIVER",
    entries: &[
        (0, "Channel A VDL reception"),
        (1, "Channel B VDL reception"),
        (2, "Channel A VDL transmission"),
        (3, "Channel B VDL transmission"),
        (4, "Own information not broadcast"),
        (5, "Reserved"),
    ],
};

/// AIS navigational status.
pub static NAV_STATUS: LookupTable = LookupTable {
    name: "NAV_STATUS",
    entries: &[
        (0, "Under way using engine"),
        (1, "At anchor"),
        (2, "Not under command"),
        (3, "Restricted manoeuverability"),
        (4, "Constrained by her draught"),
        (5, "Moored"),
        (6, "Aground"),
        (7, "Engaged in Fishing"),
        (8, "Under way sailing"),
    ],
};

/// Engine instance on dual installations.
pub static ENGINE_INSTANCE: LookupTable = LookupTable {
    name: "ENGINE_INSTANCE",
    entries: &[
        (0, "Single Engine or Dual Engine Port"),
        (1, "Dual Engine Starboard"),
    ],
};

/// Raymarine Seatalk1 keystroke codes (subset).
pub static SEATALK_KEYSTROKE: LookupTable = LookupTable {
    name: "SEATALK_KEYSTROKE",
    entries: &[
        (1, "Auto"),
        (2, "Standby"),
        (3, "Wind"),
        (5, "-1"),
        (6, "-10"),
        (7, "+1"),
        (8, "+10"),
        (33, "-1 and -10"),
        (34, "+1 and +10"),
        (35, "Track"),
    ],
};

/// Raymarine Seatalk1 device identifiers.
pub static SEATALK_DEVICE_ID: LookupTable = LookupTable {
    name: "SEATALK_DEVICE_ID",
    entries: &[(3, "S100"), (5, "Course Computer"), (128, "ST600R")],
};

//==================================================================================BIT_TABLES

/// Discrete engine warning flags, first status word. Keys are bit positions.
pub static ENGINE_STATUS_1: LookupTable = LookupTable {
    name: "ENGINE_STATUS_1",
    entries: &[
        (0, "Check Engine"),
        (1, "Over Temperature"),
        (2, "Low Oil Pressure"),
        (3, "Low Oil Level"),
        (4, "Low Fuel Pressure"),
        (5, "Low System Voltage"),
        (6, "Low Coolant Level"),
        (7, "Water Flow"),
        (8, "Water In Fuel"),
        (9, "Charge Indicator"),
        (10, "Preheat Indicator"),
        (11, "High Boost Pressure"),
        (12, "Rev Limit Exceeded"),
        (13, "EGR System"),
        (14, "Throttle Position Sensor"),
        (15, "Emergency Stop"),
    ],
};

/// Discrete engine warning flags, second status word.
pub static ENGINE_STATUS_2: LookupTable = LookupTable {
    name: "ENGINE_STATUS_2",
    entries: &[
        (0, "Warning Level 1"),
        (1, "Warning Level 2"),
        (2, "Power Reduction"),
        (3, "Maintenance Needed"),
        (4, "Engine Comm Error"),
        (5, "Sub or Secondary Throttle"),
        (6, "Neutral Start Protect"),
        (7, "Engine Shutting Down"),
    ],
};

//==================================================================================INDIRECT_TABLES

/// ISO device functions, keyed by (device class, function code).
pub static DEVICE_FUNCTION: IndirectLookupTable = IndirectLookupTable {
    name: "DEVICE_FUNCTION",
    entries: &[
        (10, 130, "Diagnostic"),
        (10, 140, "Bus Traffic Logger"),
        (25, 130, "PC Gateway"),
        (25, 131, "NMEA 2000 to Analog Gateway"),
        (25, 132, "Analog to NMEA 2000 Gateway"),
        (25, 135, "NMEA 0183 Gateway"),
        (25, 140, "Router"),
        (25, 150, "Bridge"),
        (25, 160, "Repeater"),
        (40, 130, "Follow-up Controller"),
        (40, 140, "Autopilot"),
        (40, 150, "Rudder"),
        (50, 130, "Engine"),
        (50, 140, "Engine Gateway"),
        (50, 150, "Transmission"),
        (50, 160, "Throttle/Shift Control"),
        (60, 130, "Bottom Depth"),
        (60, 135, "Bottom Depth/Speed"),
        (60, 140, "Ownship Attitude"),
        (60, 145, "Ownship Position (GNSS)"),
        (60, 150, "Ownship Position (Loran C)"),
        (60, 155, "Speed"),
        (60, 160, "Turn Rate Indicator"),
        (60, 170, "Integrated Navigation"),
        (60, 190, "Navigation Management"),
        (60, 195, "AIS"),
        (60, 200, "Radar"),
        (60, 210, "ECDIS"),
        (70, 130, "EPIRB"),
        (70, 140, "AIS"),
        (70, 150, "DSC"),
        (70, 160, "Data Receiver"),
        (70, 170, "Satellite"),
        (70, 190, "Radiotelephone"),
        (85, 130, "Atmospheric"),
        (85, 160, "Aquatic"),
        (90, 130, "HVAC"),
        (120, 130, "Display"),
        (120, 140, "Alarm Enunciator"),
        (125, 130, "Multimedia Player"),
        (125, 140, "Multimedia Controller"),
    ],
};

//==================================================================================FIELD_TYPE_TABLES

/// Key/value parameter types used by proprietary key/value messages: the key
/// selects the concrete field type of the value that follows it.
pub static KEY_VALUE_TYPE: FieldTypeLookupTable = FieldTypeLookupTable {
    name: "KEY_VALUE_TYPE",
    entries: &[
        (0, "Duration", FieldKind::Duration, 32),
        (1, "Percentage", FieldKind::Percentage, 8),
        (2, "Temperature", FieldKind::Temperature, 16),
        (3, "Voltage", FieldKind::Voltage, 16),
        (4, "Counter", FieldKind::UnsignedInteger, 32),
        (5, "Text", FieldKind::StringLau, 0),
    ],
};

//==================================================================================REGISTRIES

static PAIR_TABLES: &[&LookupTable] = &[
    &MANUFACTURER_CODE,
    &INDUSTRY_CODE,
    &DEVICE_CLASS,
    &TIME_SOURCE,
    &DIRECTION_REFERENCE,
    &WIND_REFERENCE,
    &TEMPERATURE_SOURCE,
    &GNS,
    &GNS_METHOD,
    &GNS_INTEGRITY,
    &RANGE_RESIDUAL_MODE,
    &SATELLITE_STATUS,
    &YES_NO,
    &ISO_CONTROL,
    &GROUP_FUNCTION,
    &PGN_LIST_FUNCTION,
    &AIS_MESSAGE_ID,
    &REPEAT_INDICATOR,
    &POSITION_ACCURACY,
    &RAIM_FLAG,
    &AIS_TRANSCEIVER,
    &NAV_STATUS,
    &ENGINE_INSTANCE,
    &SEATALK_KEYSTROKE,
    &SEATALK_DEVICE_ID,
];

static BIT_TABLES: &[&LookupTable] = &[&ENGINE_STATUS_1, &ENGINE_STATUS_2];

static INDIRECT_TABLES: &[&IndirectLookupTable] = &[&DEVICE_FUNCTION];

static FIELD_TYPE_TABLES: &[&FieldTypeLookupTable] = &[&KEY_VALUE_TYPE];

/// Find a flat pair table by name.
pub fn pair_table(name: &str) -> Option<&'static LookupTable> {
    PAIR_TABLES.iter().find(|t| t.name == name).copied()
}

/// Find a bit table by name.
pub fn bit_table(name: &str) -> Option<&'static LookupTable> {
    BIT_TABLES.iter().find(|t| t.name == name).copied()
}

/// Find an indirect table by name.
pub fn indirect_table(name: &str) -> Option<&'static IndirectLookupTable> {
    INDIRECT_TABLES.iter().find(|t| t.name == name).copied()
}

/// Find a field-type table by name.
pub fn field_type_table(name: &str) -> Option<&'static FieldTypeLookupTable> {
    FIELD_TYPE_TABLES.iter().find(|t| t.name == name).copied()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
