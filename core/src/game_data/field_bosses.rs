//! Field boss respawn table
//!
//! Names are the persisted record keys. Renaming an entry orphans every
//! stored kill for that boss, so they stay exactly as the game spells them.

use phf::phf_ordered_map;

/// Respawn interval in minutes, keyed by boss name, in catalogue order.
pub static FIELD_BOSSES: phf::OrderedMap<&'static str, u32> = phf_ordered_map! {
    // ─────────────────────────────────────────────────────────────────────────
    // 2h - 4h30m
    // ─────────────────────────────────────────────────────────────────────────
    "佩爾利斯" => 120,
    "巴實那" => 150,
    "采爾圖巴" => 180,
    "潘納洛德" => 180,
    "安庫拉" => 210,
    "坦佛斯特" => 210,
    "史坦" => 240,
    "布賴卡" => 240,
    "魔圖拉" => 240,
    "特倫巴" => 270,

    // ─────────────────────────────────────────────────────────────────────────
    // 5h - 7h30m
    // ─────────────────────────────────────────────────────────────────────────
    "提米特利斯" => 300,
    "塔金" => 300,
    "雷比魯" => 300,
    "凱索思" => 360,
    "巨蟻女王" => 360,
    "卡雷斯" => 360,
    "貝希莫斯" => 360,
    "希瑟雷蒙" => 360,
    "塔拉金" => 420,
    "沙勒卡" => 420,
    "梅杜莎" => 420,
    "賽魯" => 450,

    // ─────────────────────────────────────────────────────────────────────────
    // 8h - 10h
    // ─────────────────────────────────────────────────────────────────────────
    "潘柴特" => 480,
    "突變克魯瑪" => 480,
    "被汙染的克魯瑪" => 480,
    "卡坦" => 480,
    "提米妮爾" => 480,
    "瓦柏" => 480,
    "克拉奇" => 480,
    "弗林特" => 480,
    "蘭多勒" => 480,
    "費德" => 540,
    "寇倫" => 600,
    "瑪杜克" => 600,

    // ─────────────────────────────────────────────────────────────────────────
    // 12h
    // ─────────────────────────────────────────────────────────────────────────
    "薩班" => 720,
    "核心基座" => 720,
    "猛龍獸" => 720,
    "黑色蕾爾莉" => 720,
    "司穆艾爾" => 720,
    "卡布里歐" => 720,
    "安德拉斯" => 720,
    "忘卻之鏡" => 720,
    "納伊阿斯" => 720,
    "希拉" => 720,
    "姆夫" => 720,

    // ─────────────────────────────────────────────────────────────────────────
    // 18h and longer
    // ─────────────────────────────────────────────────────────────────────────
    "諾勒姆斯" => 1080,
    "烏坎巴" => 1080,
    "伊波斯" => 1080,
    "凱都都" => 1080,
    "伊格尼思" => 1080,
    "奧爾芬" => 1440,
    "哈普" => 1440,
    "歐克斯" => 1440,
    "塔那透斯" => 1440,
    "鳳凰" => 1440,
    "摩德烏斯" => 1440,
    "霸拉克" => 1440,
    "薩拉克斯" => 1440,
    "巴倫" => 1440,
    "黑卡頓" => 1440,
    "拉何" => 1980,
};
