//! # 本地化文本
//!
//! 业务层自身产生的面向用户的文本（校验提示、AI 失败致歉、欢迎语等）。
//! 界面标签等纯展示文本由前端负责，不在此处维护。

use crate::models::settings::Language;

/// 文本键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    /// 订单编号或客户名称为空
    RequiredFields,
    /// 新建订单的编号已存在
    DuplicateId,
    /// AI 远程调用失败时的致歉回复
    AssistantUnavailable,
    /// 聊天窗口的初始欢迎语
    AssistantWelcome,
    /// 筛选结果为空
    NoOrders,
}

/// 查询本地化文本
pub fn text(key: Text, lang: Language) -> &'static str {
    match (key, lang) {
        (Text::RequiredFields, Language::Zh) => "订单编号和客户名称为必填项",
        (Text::RequiredFields, Language::En) => "Order ID and Customer Name are required",
        (Text::RequiredFields, Language::Ms) => "ID Pesanan dan Nama Pelanggan wajib diisi",

        (Text::DuplicateId, Language::Zh) => "订单编号已存在",
        (Text::DuplicateId, Language::En) => "Order ID already exists",
        (Text::DuplicateId, Language::Ms) => "ID Pesanan sudah wujud",

        (Text::AssistantUnavailable, Language::Zh) => {
            "抱歉，目前连接追踪网络时遇到困难。请稍后重试。"
        }
        (Text::AssistantUnavailable, Language::En) => {
            "I'm sorry, I'm having trouble connecting to the tracking network right now. Please try again later."
        }
        (Text::AssistantUnavailable, Language::Ms) => {
            "Maaf, saya menghadapi masalah menyambung ke rangkaian penjejakan buat masa ini. Sila cuba lagi kemudian."
        }

        (Text::AssistantWelcome, Language::Zh) => {
            "您好！我是 Caslink 物流助手，可以帮您查询订单状态、客户信息和物流建议。"
        }
        (Text::AssistantWelcome, Language::En) => {
            "Hello! I'm the Caslink logistics assistant. Ask me about order status, customers, or shipping advice."
        }
        (Text::AssistantWelcome, Language::Ms) => {
            "Helo! Saya pembantu logistik Caslink. Tanya saya tentang status pesanan, pelanggan atau nasihat penghantaran."
        }

        (Text::NoOrders, Language::Zh) => "没有找到匹配的订单",
        (Text::NoOrders, Language::En) => "No matching orders found",
        (Text::NoOrders, Language::Ms) => "Tiada pesanan sepadan ditemui",
    }
}
