/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/6/26
******************************************************************************/

//! The FIX 4.4 profile tables.
//!
//! Everything in this module is compiled in; there is no runtime dictionary
//! loading. Required-field sets list only the tags beyond the shared
//! header/trailer, which [`crate::Dictionary::new`] prepends to every set.

use crate::schema::FieldType;

/// Header and trailer tags required in every FIX 4.4 message.
pub(crate) const HEADER_TAGS: &[u32] = &[8, 9, 35, 49, 56, 34, 52, 10];

/// Recognized FIX 4.4 message types.
pub(crate) const MSG_TYPES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "A", "B", "C", "D", "E", "F", "G", "H", "I",
    "J", "K", "L", "M", "N", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Required tags per message type, beyond the shared header/trailer.
pub(crate) const REQUIRED: &[(&str, &[u32])] = &[
    // Session layer
    ("0", &[]),                                                             // Heartbeat
    ("1", &[112]),                                                          // TestRequest
    ("2", &[7, 16]),                                                        // ResendRequest
    ("3", &[45, 58]),                                                       // Reject
    ("4", &[36]),                                                           // SequenceReset
    ("5", &[]),                                                             // Logout
    ("A", &[]),                                                             // Logon
    // Order entry
    ("D", &[11, 21, 55, 54, 60]),                                           // NewOrderSingle
    ("F", &[11, 21, 41, 55, 54, 60]),                                       // OrderCancelRequest
    ("G", &[11, 21, 41, 55, 54, 60]),                                       // OrderCancelReplace
    ("H", &[11, 21, 55, 54, 60]),                                           // OrderStatusRequest
    ("8", &[6, 11, 14, 17, 20, 31, 32, 37, 38, 39, 40, 54, 55, 60]),        // ExecutionReport
    ("9", &[11, 37, 39, 434]),                                              // OrderCancelReject
    // Market data
    ("V", &[262, 263, 264, 265, 267, 269]),                                 // MarketDataRequest
    ("W", &[262, 268]),                                                     // MDSnapshotFullRefresh
    ("X", &[262, 268]),                                                     // MDIncrementalRefresh
    ("Y", &[262, 58]),                                                      // MDRequestReject
];

/// Field catalogue: tag, name, type class.
pub(crate) const FIELDS: &[(u32, &str, FieldType)] = &[
    // Header / trailer
    (8, "BeginString", FieldType::Text),
    (9, "BodyLength", FieldType::Length),
    (10, "CheckSum", FieldType::Text),
    (34, "MsgSeqNum", FieldType::SeqNum),
    (35, "MsgType", FieldType::Text),
    (49, "SenderCompID", FieldType::Text),
    (52, "SendingTime", FieldType::UtcTimestamp),
    (56, "TargetCompID", FieldType::Text),
    // Body
    (6, "AvgPx", FieldType::Qty),
    (7, "BeginSeqNo", FieldType::SeqNum),
    (11, "ClOrdID", FieldType::Text),
    (14, "CumQty", FieldType::Qty),
    (16, "EndSeqNo", FieldType::SeqNum),
    (17, "ExecID", FieldType::Text),
    (20, "ExecTransType", FieldType::Char),
    (21, "HandlInst", FieldType::Char),
    (31, "LastPx", FieldType::Qty),
    (32, "LastQty", FieldType::Qty),
    (36, "NewSeqNo", FieldType::SeqNum),
    (37, "OrderID", FieldType::Text),
    (38, "OrderQty", FieldType::Qty),
    (39, "OrdStatus", FieldType::Char),
    (40, "OrdType", FieldType::Char),
    (41, "OrigClOrdID", FieldType::Text),
    (44, "Price", FieldType::Qty),
    (45, "RefSeqNum", FieldType::SeqNum),
    (54, "Side", FieldType::Char),
    (55, "Symbol", FieldType::Text),
    (58, "Text", FieldType::Text),
    (60, "TransactTime", FieldType::UtcTimestamp),
    (98, "EncryptMethod", FieldType::Int),
    (108, "HeartBtInt", FieldType::Int),
    (112, "TestReqID", FieldType::Text),
    (141, "ResetSeqNumFlag", FieldType::Char),
    (262, "MDReqID", FieldType::Text),
    (263, "SubscriptionRequestType", FieldType::Char),
    (264, "MarketDepth", FieldType::Int),
    (265, "MDUpdateType", FieldType::Int),
    (267, "NoMDEntryTypes", FieldType::Int),
    (268, "NoMDEntries", FieldType::Int),
    (269, "MDEntryType", FieldType::Char),
    (434, "CxlRejResponseTo", FieldType::Char),
];
